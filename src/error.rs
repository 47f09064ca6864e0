//! Custom error types for Pocketbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::AccountType;

/// The main error type for Pocketbook operations
#[derive(Error, Debug)]
pub enum PocketError {
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

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A card-only operation was attempted on a standard account
    #[error("Account '{account}' is a {account_type} account, not a credit card")]
    InvalidAccountType {
        account: String,
        account_type: AccountType,
    },

    /// Closing or due day outside 1-31
    #[error("Invalid {field}: {day} (must be between 1 and 31)")]
    InvalidDayOfMonth { field: &'static str, day: u32 },

    /// A date that is missing, unparsable or out of range
    #[error("Malformed date: {0}")]
    MalformedDate(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PocketError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PocketError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PocketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Pocketbook operations
pub type PocketResult<T> = Result<T, PocketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PocketError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PocketError::account_not_found("Nubank");
        assert_eq!(err.to_string(), "Account not found: Nubank");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_invalid_account_type_error() {
        let err = PocketError::InvalidAccountType {
            account: "Wallet".into(),
            account_type: AccountType::Cash,
        };
        assert_eq!(
            err.to_string(),
            "Account 'Wallet' is a Cash account, not a credit card"
        );
    }

    #[test]
    fn test_invalid_day_error() {
        let err = PocketError::InvalidDayOfMonth {
            field: "closing day",
            day: 32,
        };
        assert_eq!(
            err.to_string(),
            "Invalid closing day: 32 (must be between 1 and 31)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PocketError = io_err.into();
        assert!(matches!(err, PocketError::Io(_)));
    }
}
