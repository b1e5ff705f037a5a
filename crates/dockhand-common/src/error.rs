//! Unified error types for the dockhand workspace.
//!
//! Only listing and construction failures ever reach a caller as `Err`.
//! Probes degrade to a boolean or [`DaemonState::Unknown`], and dispatched
//! actions report failure through their completion callback.
//!
//! [`DaemonState::Unknown`]: crate::types::DaemonState::Unknown

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DockhandError {
    /// The process launcher could not start a command.
    #[error("could not start `{command}`")]
    Spawn {
        /// Command line that could not be started.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A command ran but exited with a failure status.
    #[error("`{command}` exited with {}: {}", describe_code(.code), .stderr.trim())]
    NonZeroExit {
        /// Command line that failed.
        command: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The container listing could not be produced.
    #[error("failed to list containers: {source}")]
    Listing {
        /// Spawn or exit failure that caused the listing to fail.
        #[source]
        source: Box<Self>,
    },

    /// The background event loop could not be created.
    #[error("failed to start the command event loop: {source}")]
    EventLoop {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

impl DockhandError {
    /// Wraps a spawn or exit failure as a listing failure.
    #[must_use]
    pub fn listing(cause: Self) -> Self {
        Self::Listing {
            source: Box::new(cause),
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_owned(), |c| format!("status {c}"))
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DockhandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_names_command_and_code() {
        let err = DockhandError::NonZeroExit {
            command: "docker ps -a".into(),
            code: Some(1),
            stderr: "Cannot connect to the Docker daemon\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`docker ps -a` exited with status 1: Cannot connect to the Docker daemon"
        );
    }

    #[test]
    fn signal_exit_is_described() {
        let err = DockhandError::NonZeroExit {
            command: "docker ps".into(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("a signal"));
    }

    #[test]
    fn listing_wraps_cause() {
        let err = DockhandError::listing(DockhandError::Spawn {
            command: "docker ps".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert!(err.to_string().starts_with("failed to list containers"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
