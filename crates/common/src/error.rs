//! Unified error type for dropship-bot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("trend source error: {0}")]
    TrendSource(String),

    #[error("market data source error: {0}")]
    MarketData(String),

    #[error("competition source error: {0}")]
    Competition(String),

    #[error("detail source error: {0}")]
    Details(String),

    #[error("no suppliers available for {0}")]
    NoSuppliers(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
