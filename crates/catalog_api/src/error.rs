//! Error types for the catalog REST clients.

use thiserror::Error;

/// Errors surfaced by [`crate::AuthApi`] and [`crate::ContentApi`] implementations.
///
/// `Display` for [`ApiError::Rejected`] is exactly the server-provided message so it can be
/// shown inline next to a form without further formatting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server `message` field, or an operation-specific fallback.
        message: String,
    },

    /// Request never produced a response (offline, DNS, CORS, aborted fetch).
    #[error("network request failed: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Configured API base URL is unusable.
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Returns the HTTP status for server rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type for catalog API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
