//! Error type for gateway operations.

use thiserror::Error;

/// Result type alias using the gateway client's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds surfaced by [`crate::GatewayClient`].
#[derive(Debug, Error)]
pub enum Error {
    /// Request body could not be serialized
    #[error("failed to encode request: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Connection refused, DNS failure, timeout, broken body stream
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Gateway answered with a status code above 300; the body is discarded
    #[error("gateway responded with status code {0}")]
    Status(u16),

    /// Response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The caller cancelled a long-poll
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// HTTP status carried by a [`Error::Status`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub(crate) fn missing_field(field: &'static str) -> Self {
        Self::Decoding(<serde_json::Error as serde::de::Error>::missing_field(field))
    }
}
