//! Error types for backend port operations.

use thiserror::Error;

use crate::domain::BackendId;

/// Errors from backend port operations.
///
/// Implementation-specific errors (reqwest, URL parsing, JSON) are mapped to
/// these at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend could not be reached at all.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the network failure
        message: String,
    },

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or request description
        message: String,
    },

    /// The backend answered 2xx but the body could not be interpreted.
    #[error("Invalid backend response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The backend does not offer this operation.
    #[error("{backend} does not support {operation}")]
    Unsupported {
        /// The backend that was asked
        backend: BackendId,
        /// The operation that is missing
        operation: &'static str,
    },

    /// Client-side configuration problem (bad base URL and similar).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

impl BackendError {
    /// HTTP status, if the backend answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened before any response arrived.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Result type alias for backend port operations.
pub type BackendResult<T> = Result<T, BackendError>;
