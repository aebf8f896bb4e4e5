//! Error types for quotelift-core

use thiserror::Error;

/// Result type alias using quotelift-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quotelift-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote store call failed (network, non-2xx status or malformed body)
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// Quote provider call failed
    #[error("Failed to fetch quote: {0}")]
    FetchFailed(String),

    /// Quote not found
    #[error("Quote not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn remote(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable(message.into())
    }

    pub(crate) fn fetch(message: impl Into<String>) -> Self {
        Self::FetchFailed(message.into())
    }

    /// Whether this error came from the remote store
    pub const fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }
}
