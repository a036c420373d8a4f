use reqwest::StatusCode;
use thiserror::Error;

/// Errors from a record-store round-trip.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True for failures worth a single retry on read calls.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            Self::Network(err) => err.is_timeout() || err.is_connect(),
            Self::Server { .. } | Self::Unavailable(_) => false,
        }
    }
}
