//! CLI subcommand implementations.

pub mod article;
pub mod insights;
pub mod news;
pub mod quotes;
pub mod top;

use std::time::Duration;

use anyhow::{Context, Result};
use stockboard_lib::cache::MemoryCache;
use stockboard_lib::CachedClient;

/// Quote commands need a data-portal service key; news commands do not.
pub fn quote_client() -> Result<CachedClient> {
    let service_key = std::env::var("KRX_SERVICE_KEY")
        .context("KRX_SERVICE_KEY is not set; request a key from the data portal")?;
    let cache = MemoryCache::new(Duration::from_secs(300));
    Ok(CachedClient::new(&service_key, cache))
}
