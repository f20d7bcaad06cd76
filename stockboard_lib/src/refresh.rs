//! Staleness-gated refresh over the scraped-news store.
//!
//! Each scrape domain is either FRESH or STALE. A read first checks the
//! stored checkpoint: absent or older than the freshness window means STALE,
//! which triggers one scrape attempt. A successful scrape replaces the
//! domain's rows and checkpoint transactionally; a failed or empty scrape
//! leaves both untouched so the next read serves stale-but-present data
//! rather than nothing. Reads always come from the store, never from the
//! network response directly.

use chrono::{Duration, Utc};

use crate::db::{Db, DbError};
use crate::error::StockboardError;
use crate::scrape::{NewsItem, ScrapeClient};

/// Freshness window shared by both scrape domains.
const FRESHNESS_WINDOW_SECS: i64 = 3600;

/// Domain key for the global headline feed.
pub const INSIGHTS_DOMAIN: &str = "insights";

/// Domain key for one stock symbol's news feed.
pub fn news_domain(symbol: &str) -> String {
    format!("news:{}", symbol)
}

pub struct Refresher {
    db: Db,
    scraper: ScrapeClient,
    window: Duration,
}

impl Refresher {
    pub fn new(db: Db, scraper: ScrapeClient) -> Self {
        Self::with_window(db, scraper, Duration::seconds(FRESHNESS_WINDOW_SECS))
    }

    /// Overrides the freshness window. Used by tests.
    pub fn with_window(db: Db, scraper: ScrapeClient, window: Duration) -> Self {
        Self {
            db,
            scraper,
            window,
        }
    }

    /// Read access to the backing store (checkpoint inspection in callers
    /// and tests).
    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Serves the global headline feed, re-scraping first if stale.
    pub async fn insights(&mut self) -> Result<Vec<NewsItem>, StockboardError> {
        if self.is_stale(INSIGHTS_DOMAIN)? {
            let outcome = self.scraper.market_insights().await;
            self.apply(INSIGHTS_DOMAIN, outcome)?;
        }
        Ok(self.db.news_for(INSIGHTS_DOMAIN)?)
    }

    /// Serves one symbol's news feed, re-scraping first if stale.
    pub async fn stock_news(&mut self, symbol: &str) -> Result<Vec<NewsItem>, StockboardError> {
        let domain = news_domain(symbol);
        if self.is_stale(&domain)? {
            let outcome = self.scraper.stock_news(symbol).await;
            self.apply(&domain, outcome)?;
        }
        Ok(self.db.news_for(&domain)?)
    }

    fn is_stale(&self, domain: &str) -> Result<bool, DbError> {
        Ok(match self.db.checkpoint(domain)? {
            Some(stamp) => Utc::now() - stamp > self.window,
            None => true,
        })
    }

    /// Applies one scrape outcome: replace on success with rows, keep the
    /// stored state on error or empty result.
    fn apply(
        &mut self,
        domain: &str,
        outcome: Result<Vec<NewsItem>, crate::scrape::ScrapeError>,
    ) -> Result<(), StockboardError> {
        match outcome {
            Ok(items) if !items.is_empty() => {
                tracing::info!(domain, count = items.len(), "refreshed scrape domain");
                self.db.replace_news(domain, &items, Utc::now())?;
            }
            Ok(_) => {
                tracing::warn!(domain, "scrape returned no items, keeping stored rows");
            }
            Err(err) => {
                tracing::warn!(domain, error = %err, "scrape failed, keeping stored rows");
            }
        }
        Ok(())
    }
}
