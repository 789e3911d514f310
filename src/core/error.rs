//! Error taxonomy for repository, seed and export operations
//!
//! Every failure a caller can observe maps onto one of four kinds
//! (see [`ErrorKind`]). None of them is fatal: the CLI reports the
//! diagnostic and the store stays usable for the next request.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HosconError>;

/// Coarse error category exposed to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing required field or value outside its enumerated domain
    Validation,
    /// Unique-name collision
    DuplicateKey,
    /// Update or reference to an id that does not exist
    NotFound,
    /// Storage or export filesystem failure
    Io,
}

#[derive(Debug, Error, Diagnostic)]
pub enum HosconError {
    #[error("Invalid {field}: {message}")]
    #[diagnostic(code(hoscon::validation))]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{entity} '{name}' already exists")]
    #[diagnostic(
        code(hoscon::duplicate),
        help("names must be unique; update the existing record instead")
    )]
    DuplicateKey { entity: &'static str, name: String },

    #[error("{entity} {id} not found")]
    #[diagnostic(code(hoscon::not_found))]
    NotFound { entity: &'static str, id: i64 },

    #[error("IO error at {}: {source}", path.display())]
    #[diagnostic(code(hoscon::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage error: {0}")]
    #[diagnostic(code(hoscon::storage))]
    Storage(#[from] rusqlite::Error),

    #[error("CSV export failed: {0}")]
    #[diagnostic(code(hoscon::io))]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    #[diagnostic(code(hoscon::io))]
    Json(#[from] serde_json::Error),
}

impl HosconError {
    /// Build a validation error for a field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        HosconError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Wrap an IO error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HosconError::Io {
            path: path.into(),
            source,
        }
    }

    /// Map onto the four-way taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            HosconError::Validation { .. } => ErrorKind::Validation,
            HosconError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            HosconError::NotFound { .. } => ErrorKind::NotFound,
            HosconError::Io { .. }
            | HosconError::Storage(_)
            | HosconError::Csv(_)
            | HosconError::Json(_) => ErrorKind::Io,
        }
    }
}

/// Require a non-blank text field, returning it trimmed
pub fn require_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HosconError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("name", "  ICU ").unwrap(), "ICU");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        let err = require_text("name", "   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Invalid name: must not be empty");
    }

    #[test]
    fn test_kind_mapping() {
        let err = HosconError::NotFound {
            entity: "Department",
            id: 7,
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Department 7 not found");

        let err = HosconError::io(
            "exports",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
