//! Error types for brigadelog.
//!
//! This module defines all error types used throughout the brigadelog crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::SectionId;
use crate::validate::FieldError;

/// The main error type for brigadelog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Draft File Errors ===
    /// Failed to read a draft file from disk.
    #[error("failed to read draft at {path}: {source}")]
    DraftRead {
        /// Path to the draft file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A draft file could not be parsed.
    #[error("failed to parse draft at {path}: {source}")]
    DraftParse {
        /// Path to the draft file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    // === Validation Errors ===
    /// A wizard section failed field validation.
    #[error("validation failed for section '{section}': {} field(s) need attention", errors.len())]
    Validation {
        /// The section that failed validation.
        section: SectionId,
        /// The per-field error list.
        errors: Vec<FieldError>,
    },

    // === Remote Errors ===
    /// A request could not reach the remote service.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The remote service rejected a request.
    #[error("remote service error ({status}): {message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// Human-readable message, taken from the error payload when present.
        message: String,
    },

    /// Profile creation succeeded but no brigade id could be located in the
    /// response under any known key.
    #[error("brigade created but no id found in response: {payload}")]
    MissingBrigadeId {
        /// The raw response payload, kept for diagnosis.
        payload: serde_json::Value,
    },

    /// No stored session; the command requires authentication.
    #[error("not logged in; run `briglog login` first")]
    NotLoggedIn,

    // === Document Errors ===
    /// Building or saving the printable document failed.
    #[error("document generation failed: {message}")]
    Document {
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for brigadelog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new remote service error.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new document generation error.
    #[must_use]
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a validation error from a section's field error list.
    #[must_use]
    pub fn validation(section: SectionId, errors: Vec<FieldError>) -> Self {
        Self::Validation { section, errors }
    }

    /// Check if this error is a local validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error came from the transport or remote service.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Api { .. } | Self::MissingBrigadeId { .. }
        )
    }

    /// Check if this error means the created brigade id could not be found.
    #[must_use]
    pub fn is_missing_id(&self) -> bool {
        matches!(self, Self::MissingBrigadeId { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Field;

    #[test]
    fn test_error_display() {
        let err = Error::NotLoggedIn;
        assert_eq!(err.to_string(), "not logged in; run `briglog login` first");

        let err = Error::api(500, "boom");
        assert_eq!(err.to_string(), "remote service error (500): boom");
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_document_error_display() {
        let err = Error::document("page too small");
        assert!(err.to_string().contains("page too small"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation(
            SectionId::Info,
            vec![FieldError::new(Field::BrigadeName, "required")],
        );
        let msg = err.to_string();
        assert!(msg.contains("info"));
        assert!(msg.contains("1 field(s)"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_brigade_id_display() {
        let err = Error::MissingBrigadeId {
            payload: serde_json::json!({"status": "ok"}),
        };
        let msg = err.to_string();
        assert!(msg.contains("no id found"));
        assert!(msg.contains("\"ok\""));
        assert!(err.is_missing_id());
        assert!(err.is_remote());
    }

    #[test]
    fn test_api_error_is_remote() {
        assert!(Error::api(422, "bad payload").is_remote());
        assert!(!Error::NotLoggedIn.is_remote());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "invalid base_url".to_string(),
        };
        assert!(err.to_string().contains("invalid base_url"));
    }

    #[test]
    fn test_draft_read_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::DraftRead {
            path: PathBuf::from("/tmp/draft.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/draft.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_draft_parse_error_display() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err = Error::DraftParse {
                path: PathBuf::from("/tmp/draft.json"),
                source: json_err,
            };
            assert!(err.to_string().contains("/tmp/draft.json"));
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
