//! Custom error types for quick transaction entry
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::DraftField;

/// The main error type for quick-add operations
#[derive(Error, Debug)]
pub enum QuickAddError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The draft is missing fields required for submission
    #[error("Transaction is incomplete: missing {}", format_missing(.missing))]
    IncompleteDraft { missing: Vec<DraftField> },

    /// The write request failed; the draft is kept so it can be resubmitted
    #[error("Failed to save transaction: {0}")]
    Write(String),

    /// A read request against the data engine failed
    #[error("Query error: {0}")]
    Query(String),

    /// A submission for this form is already running
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// The form session was dismissed or already submitted
    #[error("The transaction form has been closed")]
    SessionClosed,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

fn format_missing(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl QuickAddError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for payees
    pub fn payee_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Payee",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (including an incomplete draft)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::IncompleteDraft { .. })
    }

    /// Check if the user can retry the same submission unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Write(_) | Self::SubmissionInProgress)
    }
}

impl From<std::io::Error> for QuickAddError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuickAddError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for quick-add operations
pub type QuickAddResult<T> = Result<T, QuickAddError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuickAddError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = QuickAddError::account_not_found("Checking");
        assert_eq!(err.to_string(), "Account not found: Checking");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_incomplete_draft_lists_fields() {
        let err = QuickAddError::IncompleteDraft {
            missing: vec![DraftField::Account, DraftField::Amount],
        };
        assert_eq!(
            err.to_string(),
            "Transaction is incomplete: missing account, amount"
        );
        assert!(err.is_validation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_write_error_is_retryable() {
        let err = QuickAddError::Write("connection reset".into());
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Failed to save transaction: connection reset"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QuickAddError = io_err.into();
        assert!(matches!(err, QuickAddError::Io(_)));
    }
}
