use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single fetch strategy invocation.
///
/// Every variant is recoverable: the retrieval manager turns it into a
/// user-visible warning and publishes the fallback catalog instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("network error: {0}")]
    Network(String),

    #[error("non-2xx status {status} from upstream")]
    Status { status: u16, body: String },

    #[error("no JSON array found in model output")]
    NoJsonArray,

    #[error("parse failure: {0}")]
    Parse(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl StrategyError {
    /// Short label used in logs and metrics-like counters.
    pub fn kind(&self) -> &'static str {
        match self {
            StrategyError::Network(_) => "network",
            StrategyError::Status { .. } => "status",
            StrategyError::NoJsonArray => "no_json_array",
            StrategyError::Parse(_) => "parse",
            StrategyError::Timeout(_) => "timeout",
        }
    }
}
