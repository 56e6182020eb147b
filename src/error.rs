//! Typed error types for redshiftctl.
//!
//! Library operations return [`ControlError`] so command handlers can tell a
//! rejected input apart from a failed launch or an unwritable config file.
//! A redshift instance that is simply not running is never an error; it is
//! reported as [`crate::status::LiveStatus::NotRunning`].

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ControlError {
    /// The configuration file could not be read, created or written.
    #[error("cannot access '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external program was missing or a synchronous call exited non-zero.
    #[error("{0}")]
    ProcessLaunch(String),

    /// Input was rejected before any process was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_transparent() {
        let err: ControlError = ValidationError::Coordinates.into();
        assert_eq!(err.to_string(), ValidationError::Coordinates.to_string());
    }

    #[test]
    fn test_file_access_names_the_path() {
        let err = ControlError::FileAccess {
            path: PathBuf::from("/nowhere/redshift.conf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/nowhere/redshift.conf"));
        assert!(message.contains("denied"));
    }
}
