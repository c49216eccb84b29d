//! Error types for the display agent.

use pricewatch_market_data::MarketDataError;
use pricewatch_notify::NotifyError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Please set a notification key first")]
    MissingNotificationKey,

    #[error("Sample source error: {0}")]
    Source(String),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
