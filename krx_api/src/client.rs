//! HTTP client for the government open-data stock price service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, QuoteQuery},
    types::{Envelope, Quote},
    user_agent::get_user_agent,
    Error,
};

const DEFAULT_BASE_URL: &str =
    "https://apis.data.go.kr/1160100/service/GetStockSecuritiesInfoService";

/// HTTP client for the open-data quote service.
///
/// Every request carries the caller's service key, asks for the JSON result
/// type, and uses a rotating user agent with a 30-second timeout. Each
/// request builds a fresh `reqwest::Client`.
pub struct Client {
    /// Base URL for the service. Defaults to the production data portal.
    base_api_url: String,
    /// Service key issued by the data portal; sent as a query parameter.
    service_key: String,
}

impl Client {
    /// Creates a new client pointing at the production data portal.
    pub fn new(service_key: &str) -> Self {
        Self {
            base_api_url: DEFAULT_BASE_URL.to_string(),
            service_key: service_key.to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, service_key: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url =
            Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        url.query_pairs_mut()
            .append_pair("serviceKey", &self.service_key)
            .append_pair("resultType", "json");
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "ko-KR,ko;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches quotes matching the given query and coerces each row.
    ///
    /// A success envelope with no `items` field means the query matched
    /// nothing; that is `Ok` with an empty vector, distinct from transport
    /// and upstream errors which are typed.
    pub async fn get_quotes(&self, query: &QuoteQuery) -> Result<Vec<Quote>, Error> {
        let envelope = self
            .get::<Envelope, QuoteQuery>("/getStockPriceInfo", Some(query))
            .await?;

        let header = envelope.response.header;
        if header.result_code != "00" {
            tracing::error!(
                "Upstream result code {}: {}",
                header.result_code,
                header.result_msg
            );
            return Err(Error::Upstream {
                code: header.result_code,
                msg: header.result_msg,
            });
        }

        let raw = envelope
            .response
            .body
            .and_then(|body| body.items)
            .and_then(|items| items.item)
            .map(|item| item.into_vec())
            .unwrap_or_default();

        Ok(raw.into_iter().map(Quote::from).collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        // Back off to a char boundary; upstream error bodies are Korean text.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...[truncated]", &body[..cut])
    }
}
