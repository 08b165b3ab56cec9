//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `ConsoleError` to exit codes and user-facing messages.

use mcpdesk_core::{BackendError, ConsoleError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core service error with no more specific category.
    #[error("{0}")]
    Core(String),

    /// Argument error (unknown source prefix, malformed id, missing input).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operation was interrupted.
    #[error("Interrupted")]
    Interrupted,
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    /// - 130: Terminated by Ctrl-C
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::NotFound(_) => 66,    // EX_NOINPUT
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Config(_) => 78,      // EX_CONFIG
            Self::Interrupted => 130,
        }
    }
}

impl From<ConsoleError> for CliError {
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::UnknownSource(_)
            | ConsoleError::MalformedId(_)
            | ConsoleError::InvalidInput(_) => Self::Arguments(err.to_string()),
            ConsoleError::UnknownServer(_) | ConsoleError::NotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            ConsoleError::Backend {
                source: BackendError::Transport { .. },
                ..
            } => Self::Unavailable(err.to_string()),
            ConsoleError::Backend {
                source: BackendError::Configuration { .. },
                ..
            }
            | ConsoleError::ConfigSave { .. }
            | ConsoleError::ReloadFailed { .. } => Self::Config(err.to_string()),
            ConsoleError::Backend { .. } => Self::Core(err.to_string()),
            ConsoleError::Cancelled => Self::Interrupted,
        }
    }
}

impl From<BackendError> for CliError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Configuration { message } => Self::Config(message),
            other => Self::Core(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpdesk_core::BackendId;

    #[test]
    fn test_argument_errors_exit_2() {
        let err: CliError = ConsoleError::UnknownSource("bogus".to_string()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unknown_server_exits_66() {
        let err: CliError = ConsoleError::UnknownServer("foo".to_string()).into();
        assert_eq!(err.exit_code(), 66);
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_transport_failure_is_unavailable() {
        let err: CliError = ConsoleError::Backend {
            backend: BackendId::ServiceNow,
            source: BackendError::Transport {
                message: "connection refused".to_string(),
            },
        }
        .into();
        assert_eq!(err.exit_code(), 69);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_reload_failure_keeps_saved_hint() {
        let err: CliError = ConsoleError::ReloadFailed {
            backend: BackendId::M365,
            source: BackendError::Http {
                status: 500,
                message: "boom".to_string(),
            },
        }
        .into();
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().contains("saved"));
    }

    #[test]
    fn test_cancelled_is_interrupted() {
        let err: CliError = ConsoleError::Cancelled.into();
        assert_eq!(err.exit_code(), 130);
    }
}
