//! Caching wrapper around the quote API client.

use krx_api::types::{dedup_latest, top_by_market_cap, Quote};
use krx_api::{Client, QuoteQuery};

use crate::cache::MemoryCache;
use crate::error::StockboardError;

/// Quote client wrapper that adds an in-memory TTL cache.
///
/// Cache hits bypass the network entirely. Results are deduplicated to one
/// row per short code (latest date wins) before caching, so range queries
/// always come back deduped. Requests are single-shot: no retry, no rate
/// limiting, no coalescing of concurrent identical fetches.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
}

impl CachedClient {
    /// Creates a new cached client against the production data portal.
    pub fn new(service_key: &str, cache: MemoryCache) -> Self {
        Self {
            inner: Client::new(service_key),
            cache,
        }
    }

    /// Creates a new cached client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, service_key: &str, cache: MemoryCache) -> Self {
        Self {
            inner: Client::with_base_url(base_url, service_key),
            cache,
        }
    }

    /// Fetches quotes matching `query`, deduplicated latest-wins per short
    /// code, serving from cache when a fresh entry exists.
    pub async fn quotes(&self, query: &QuoteQuery) -> Result<Vec<Quote>, StockboardError> {
        let cache_key = quote_cache_key(query);

        if let Some(cached) = self.cache.get(&cache_key) {
            let quotes: Vec<Quote> = serde_json::from_str(&cached)?;
            return Ok(quotes);
        }

        let quotes = dedup_latest(self.inner.get_quotes(query).await?);
        if let Ok(json) = serde_json::to_string(&quotes) {
            self.cache.set(cache_key, json);
        }
        Ok(quotes)
    }

    /// Market overview: fetches `query`, then keeps the top `n` rows by
    /// coerced market cap (descending, stable ties).
    pub async fn top(&self, query: &QuoteQuery, n: usize) -> Result<Vec<Quote>, StockboardError> {
        let quotes = self.quotes(query).await?;
        Ok(top_by_market_cap(quotes, n))
    }

    /// Like [`CachedClient::quotes`], but flattens every failure to an empty
    /// vector after logging it. Callers cannot distinguish "no rows" from
    /// "fetch failed" through this method; use [`CachedClient::quotes`] when
    /// the difference matters.
    pub async fn quotes_or_empty(&self, query: &QuoteQuery) -> Vec<Quote> {
        match self.quotes(query).await {
            Ok(quotes) => quotes,
            Err(err) => {
                tracing::warn!(error = %err, "quote fetch failed, serving empty result");
                Vec::new()
            }
        }
    }

    /// Quiet variant of [`CachedClient::top`]; same empty-on-failure contract
    /// as [`CachedClient::quotes_or_empty`].
    pub async fn top_or_empty(&self, query: &QuoteQuery, n: usize) -> Vec<Quote> {
        match self.top(query, n).await {
            Ok(quotes) => quotes,
            Err(err) => {
                tracing::warn!(error = %err, "market overview fetch failed, serving empty result");
                Vec::new()
            }
        }
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn quote_cache_key(query: &QuoteQuery) -> String {
    format!(
        "quotes:p{}:r{:?}:c{:?}:i{:?}:n{:?}:ln{:?}:m{:?}:d{:?}:b{:?}:e{:?}",
        query.common.page,
        query.common.num_of_rows,
        query.short_code,
        query.isin,
        query.name,
        query.name_like,
        query.market,
        query.base_date,
        query.begin_date,
        query.end_date,
    )
}
