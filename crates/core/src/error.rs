//! Error types for the anews domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum that folds into [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all anews operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Bundle resolution errors ---
    #[error("Bundle resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    // --- Transport errors ---
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    // --- Remote service rejected the request ---
    #[error("{operation} failed with status {status_code}: {body}")]
    Remote {
        operation: String,
        status_code: u16,
        body: String,
    },

    // --- Local pre-flight validation ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // --- Body streams ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The HTTP status carried by a remote-operation error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Bundle asset '{token}' not found at {path}: {reason}")]
    MissingAsset {
        token: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Unsupported asset type '{extension}' for {path}")]
    UnsupportedAssetType { path: PathBuf, extension: String },

    #[error("Invalid bundle reference '{token}': {reason}")]
    InvalidReference { token: String, reason: String },

    #[error("Failed to scan bundle directory {path}: {reason}")]
    DirectoryScan { path: PathBuf, reason: String },

    #[error("Article document {path} could not be read: {reason}")]
    Document { path: PathBuf, reason: String },

    #[error("Article document is not valid JSON: {reason}")]
    MalformedDocument { reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Alert was longer than max length: {length}/500 chars. The rest would be truncated")]
    AlertTooLong { length: usize },

    #[error("Alert was longer than recommended length: {length}/130 chars")]
    AlertAboveRecommended { length: usize },

    #[error("Invalid maturity rating '{0}' (expected KIDS, MATURE or GENERAL)")]
    InvalidMaturityRating(String),

    #[error("Invalid notification country '{0}' (expected EU, GB or US)")]
    InvalidCountry(String),

    #[error("Invalid sort direction '{0}' (expected ASC or DESC)")]
    InvalidSortDirection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_status_and_body() {
        let err = Error::Remote {
            operation: "CreateArticle".into(),
            status_code: 400,
            body: r#"{"errors":[{"code":"INVALID_DOCUMENT"}]}"#.into(),
        };
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("INVALID_DOCUMENT"));
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn resolution_error_folds_into_error() {
        let err: Error = ResolutionError::UnsupportedAssetType {
            path: PathBuf::from("bundle/video.mp4"),
            extension: "mp4".into(),
        }
        .into();
        assert!(matches!(err, Error::Resolution(_)));
        assert!(err.to_string().contains("mp4"));
        assert_eq!(err.status_code(), None);
    }
}
