//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading scopes and configuration
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid assignment '{input}': expected NAME=VALUE")]
    InvalidAssignment { input: String },

    #[error("Invalid variable name '{name}': only letters, digits and '_' are allowed")]
    InvalidName { name: String },

    #[error("Invalid number '{value}' for variable {name}")]
    InvalidNumber { name: String, value: String },

    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure reported by the query engine or its transport.
///
/// The message is the remote text, kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{message}")]
    Query { ref_id: String, message: String },

    #[error("{message}")]
    Resource { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_assignment_message() {
        let err = Error::InvalidAssignment {
            input: "novalue".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("novalue"));
        assert!(msg.contains("NAME=VALUE"));
    }

    #[test]
    fn test_backend_message_is_verbatim() {
        let err = BackendError::Query {
            ref_id: "A".to_string(),
            message: "table 'cpu' not found".to_string(),
        };
        assert_eq!(err.to_string(), "table 'cpu' not found");
    }
}
