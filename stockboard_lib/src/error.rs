//! Error types for the library layer.

use std::fmt;

use crate::db::DbError;
use crate::scrape::ScrapeError;

/// Errors produced by the library layer, wrapping quote API, scrape, and
/// storage failures plus cache deserialization problems.
#[derive(Debug)]
pub enum StockboardError {
    /// An error from the underlying quote API client.
    Api(krx_api::Error),
    /// A scrape operation failed.
    Scrape(ScrapeError),
    /// A storage operation failed.
    Db(DbError),
    /// JSON serialization or deserialization failed (cached payloads).
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for StockboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Scrape(e) => write!(f, "Scrape error: {}", e),
            Self::Db(e) => write!(f, "Storage error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for StockboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Scrape(e) => Some(e),
            Self::Db(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<krx_api::Error> for StockboardError {
    fn from(e: krx_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ScrapeError> for StockboardError {
    fn from(e: ScrapeError) -> Self {
        Self::Scrape(e)
    }
}

impl From<DbError> for StockboardError {
    fn from(e: DbError) -> Self {
        Self::Db(e)
    }
}

impl From<serde_json::Error> for StockboardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
