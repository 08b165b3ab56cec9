//! Service-level error type.

use thiserror::Error;

use crate::domain::{BackendId, RecordIdError};
use crate::ports::BackendError;

/// Errors from console service operations.
///
/// Fan-out operations never return these for a single backend's failure;
/// see [`super::Aggregated`]. Single-backend operations wrap the backend's
/// error with the backend it came from.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// An incident id prefix names no known backend.
    #[error("Unknown incident source: {0}")]
    UnknownSource(String),

    /// An incident id could not be split into source and local id.
    #[error("Malformed incident id: {0}")]
    MalformedId(String),

    /// A server id names no known backend.
    #[error("Unknown server: {0}")]
    UnknownServer(String),

    /// The requested record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind (`incident`, `server`)
        kind: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// A request to a single backend failed.
    #[error("{backend} request failed: {source}")]
    Backend {
        backend: BackendId,
        #[source]
        source: BackendError,
    },

    /// Writing the configuration failed; nothing was changed.
    #[error("Failed to save {backend} configuration: {source}")]
    ConfigSave {
        backend: BackendId,
        #[source]
        source: BackendError,
    },

    /// The configuration was saved but the backend did not reload it.
    ///
    /// The backend may keep serving the old configuration until it is
    /// reloaded.
    #[error("Configuration saved on {backend}, but reload failed: {source}")]
    ReloadFailed {
        backend: BackendId,
        #[source]
        source: BackendError,
    },

    /// The operation was cancelled before completing.
    #[error("Operation cancelled")]
    Cancelled,

    /// The request cannot be carried out with the given input.
    #[error("Invalid request: {0}")]
    InvalidInput(String),
}

impl ConsoleError {
    pub(crate) const fn backend(backend: BackendId, source: BackendError) -> Self {
        Self::Backend { backend, source }
    }

    /// The backend the failure is attributed to, if any.
    pub const fn failed_backend(&self) -> Option<BackendId> {
        match self {
            Self::Backend { backend, .. }
            | Self::ConfigSave { backend, .. }
            | Self::ReloadFailed { backend, .. } => Some(*backend),
            _ => None,
        }
    }
}

impl From<RecordIdError> for ConsoleError {
    fn from(err: RecordIdError) -> Self {
        match err {
            RecordIdError::UnknownSource(prefix) => Self::UnknownSource(prefix),
            RecordIdError::Malformed(id) => Self::MalformedId(id),
        }
    }
}
