//! Library layer for Stockboard: cached quote client, news/article scraping,
//! and the staleness-gated refresh store.
//!
//! Wraps the `krx_api` crate with an in-memory TTL cache and adds the Naver
//! scraping pipeline plus SQLite persistence with per-domain checkpoints.

pub mod cache;
pub mod client;
pub mod db;
pub mod error;
pub mod refresh;
pub mod scrape;

pub use krx_api;
pub use krx_api::types;
pub use krx_api::{MarketClass, Query, QuoteQuery};

pub use client::CachedClient;
pub use db::{Db, DbError};
pub use error::StockboardError;
pub use refresh::{news_domain, Refresher, INSIGHTS_DOMAIN};
pub use scrape::{ArticleContent, NewsItem, ScrapeClient, ScrapeError};
