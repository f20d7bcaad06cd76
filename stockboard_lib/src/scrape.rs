//! HTML/JSON scraping for the Naver news portal.
//!
//! Two shapes of source exist side by side: the finance portal's per-symbol
//! news table (EUC-KR HTML) and the mobile portal's headline feed (UTF-8
//! JSON). Article pages are fetched only for an allow-listed set of hosts,
//! and the character encoding is chosen from the final post-redirect URL
//! because a redirect can change the effective site.

use std::time::Duration;

use regex::Regex;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use krx_api::user_agent::get_user_agent;

/// Hosts an article URL may point at. Checked before any network call.
const ALLOWED_ARTICLE_HOSTS: &[&str] = &["n.news.naver.com", "finance.naver.com"];

/// Ordered candidate selectors per field; the first match wins.
const TITLE_SELECTORS: &[&str] = &[
    "h2#title_area span",
    "h2.media_end_head_headline",
    ".article_info h3",
    "h3.tts_head",
];
const DATE_SELECTORS: &[&str] = &[
    "span.media_end_head_info_datestamp_time",
    ".article_info .article_date",
    ".sponsor .article_date",
    "span._ARTICLE_DATE_TIME",
];
const CONTENT_SELECTORS: &[&str] = &[
    "article#dic_area",
    "#newsct_article",
    "#news_read",
    ".articleCont",
];

/// Non-content nodes removed from the content subtree before text extraction.
const STRIP_SELECTORS: &[&str] = &[
    "script",
    "style",
    ".end_photo_org",
    ".vod_player_wrap",
    ".img_desc",
    ".link_news",
    ".reporter_area",
    ".byline",
];

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}")]
    HttpStatus { status: StatusCode },
    #[error("domain not allowed: {host}")]
    DomainNotAllowed { host: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

/// One headline in a news list. No uniqueness constraint; callers truncate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub published_label: String,
}

/// Extracted article body. `paragraphs` is never empty: a scrape that yields
/// zero paragraphs is a failure (`None`), not an empty-content success.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleContent {
    pub title: String,
    pub date: String,
    pub paragraphs: Vec<String>,
    pub source: String,
}

pub struct ScrapeClient {
    /// Base for the finance portal's HTML pages (per-symbol news table).
    base_url: String,
    /// Base for the mobile portal's JSON headline feed.
    news_api_url: String,
    http: reqwest::Client,
}

impl ScrapeClient {
    pub fn new() -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: "https://finance.naver.com".to_string(),
            news_api_url: "https://m.stock.naver.com".to_string(),
            http,
        })
    }

    /// Points both the HTML and JSON bases at `base_url`. Used for testing
    /// with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()?;
        let base = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            base_url: base.clone(),
            news_api_url: base,
            http,
        })
    }

    /// Fetches and extracts one article, or `Ok(None)` when the page has no
    /// usable content. Hosts outside the allow-list fail before any I/O.
    pub async fn article(&self, url: &str) -> Result<Option<ArticleContent>, ScrapeError> {
        let parsed =
            Url::parse(url).map_err(|e| ScrapeError::Parse(format!("bad article url: {}", e)))?;
        let host = parsed.host_str().unwrap_or_default();
        if !ALLOWED_ARTICLE_HOSTS.contains(&host) {
            return Err(ScrapeError::DomainNotAllowed {
                host: host.to_string(),
            });
        }

        let (html, resolved) = self.fetch_html(url).await?;
        let source = resolved.host_str().unwrap_or_default().to_string();
        Ok(extract_article(&html, &source))
    }

    /// Fetches the finance portal's news table for one stock symbol. The
    /// symbol is percent-encoded, so it cannot smuggle extra query parameters.
    pub async fn stock_news(&self, symbol: &str) -> Result<Vec<NewsItem>, ScrapeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Parse(format!("bad base url: {}", e)))?;
        url.set_path("/item/news_news.naver");
        url.query_pairs_mut()
            .append_pair("code", symbol)
            .append_pair("page", "1");
        let (html, resolved) = self.fetch_html(url.as_str()).await?;
        parse_news_table(&html, &resolved)
    }

    /// Fetches the mobile portal's global headline feed.
    pub async fn market_insights(&self) -> Result<Vec<NewsItem>, ScrapeError> {
        let url = format!("{}/api/news/mainnews", self.news_api_url);
        let resp = self
            .http
            .get(&url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "ko-KR,ko;q=0.9,en;q=0.8")
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                status: resp.status(),
            });
        }
        let envelope: MainNewsEnvelope = serde_json::from_str(&resp.text().await?)?;
        Ok(envelope
            .items
            .into_iter()
            .map(|item| {
                let link = if item.link_url.is_empty() {
                    format!(
                        "https://n.news.naver.com/mnews/article/{}/{}",
                        item.office_id, item.article_id
                    )
                } else {
                    item.link_url
                };
                NewsItem {
                    title: clean_title(&item.title),
                    link,
                    source: item.office_name,
                    published_label: item.datetime,
                }
            })
            .collect())
    }

    /// Fetches a page, decoding with the charset implied by the *final*
    /// (post-redirect) URL, and returns the decoded text plus that URL.
    async fn fetch_html(&self, url: &str) -> Result<(String, Url), ScrapeError> {
        let resp = self
            .http
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "ko-KR,ko;q=0.9,en;q=0.8")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                status: resp.status(),
            });
        }

        let resolved = resp.url().clone();
        let charset = charset_for_host(resolved.host_str().unwrap_or_default());
        let text = resp.text_with_charset(charset).await?;
        Ok((text, resolved))
    }
}

/// The finance portal still serves legacy EUC-KR; everything else is UTF-8.
fn charset_for_host(host: &str) -> &'static str {
    if host == "finance.naver.com" || host.ends_with(".finance.naver.com") {
        "euc-kr"
    } else {
        "utf-8"
    }
}

#[derive(Deserialize)]
struct MainNewsEnvelope {
    #[serde(default)]
    items: Vec<MainNewsItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MainNewsItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    office_name: String,
    #[serde(default)]
    datetime: String,
    #[serde(default)]
    office_id: String,
    #[serde(default)]
    article_id: String,
    #[serde(default)]
    link_url: String,
}

/// Extracts title, date, and paragraphs from an article page.
///
/// Line-break and block-level tags become newlines during traversal so that
/// paragraph boundaries survive; the text is then split on newlines, trimmed,
/// and empties are discarded. Zero paragraphs means `None` even when the
/// title and date matched.
pub fn extract_article(html: &str, source: &str) -> Option<ArticleContent> {
    let doc = Html::parse_document(html);

    let content = CONTENT_SELECTORS.iter().find_map(|raw| {
        let sel = Selector::parse(raw).ok()?;
        doc.select(&sel).next()
    })?;

    let strips: Vec<Selector> = STRIP_SELECTORS
        .iter()
        .filter_map(|raw| Selector::parse(raw).ok())
        .collect();

    let mut buf = String::new();
    push_text(content, &strips, &mut buf);

    let paragraphs: Vec<String> = buf
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if paragraphs.is_empty() {
        return None;
    }

    Some(ArticleContent {
        title: select_first_text(&doc, TITLE_SELECTORS).unwrap_or_default(),
        date: select_first_text(&doc, DATE_SELECTORS).unwrap_or_default(),
        paragraphs,
        source: source.to_string(),
    })
}

/// Walks the content subtree collecting text, skipping stripped nodes and
/// turning `<br>` and block-element boundaries into newlines.
fn push_text(el: ElementRef<'_>, strips: &[Selector], out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if element.name() == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                if strips.iter().any(|sel| sel.matches(&child_el)) {
                    continue;
                }
                push_text(child_el, strips, out);
                if matches!(element.name(), "p" | "div" | "li" | "table") {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn select_first_text(doc: &Html, selectors: &[&str]) -> Option<String> {
    for raw in selectors {
        let Ok(sel) = Selector::parse(raw) else {
            continue;
        };
        if let Some(el) = doc.select(&sel).next() {
            let text = el.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Parses the finance portal's per-symbol news table. Relative links are
/// resolved against the final URL the table was served from.
fn parse_news_table(html: &str, base: &Url) -> Result<Vec<NewsItem>, ScrapeError> {
    let doc = Html::parse_document(html);
    let row_sel = parse_selector("table.type5 tr")?;
    let title_sel = parse_selector("td.title a")?;
    let info_sel = parse_selector("td.info")?;
    let date_sel = parse_selector("td.date")?;

    let mut items = Vec::new();
    for row in doc.select(&row_sel) {
        let Some(anchor) = row.select(&title_sel).next() else {
            continue;
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }
        let link = anchor
            .value()
            .attr("href")
            .and_then(|href| base.join(href).ok())
            .map(|resolved| resolved.to_string())
            .unwrap_or_default();
        let source = cell_text(&row, &info_sel);
        let published_label = cell_text(&row, &date_sel);
        items.push(NewsItem {
            title,
            link,
            source,
            published_label,
        });
    }
    Ok(items)
}

fn cell_text(row: &ElementRef<'_>, sel: &Selector) -> String {
    row.select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn parse_selector(raw: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(raw).map_err(|e| ScrapeError::Parse(format!("bad selector {}: {}", raw, e)))
}

/// Headline titles arrive with residual markup and a few HTML entities.
fn clean_title(raw: &str) -> String {
    let stripped = match Regex::new(r"<[^>]*>") {
        Ok(re) => re.replace_all(raw, "").into_owned(),
        Err(_) => raw.to_string(),
    };
    stripped
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
