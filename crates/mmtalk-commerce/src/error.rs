//! Commerce error types.

use crate::ids::OptionNo;
use thiserror::Error;

/// Errors that can occur in option selection and pricing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A selector pick did not map to any option leaf.
    #[error("Option not found for selection {first:?} / {second:?}")]
    OptionNotFound {
        first: String,
        second: Option<String>,
    },

    /// The option schema declared a type this engine does not know.
    #[error("Unknown option type: {0}")]
    UnknownOptionType(String),

    /// A DEFAULT schema arrived without its implicit option.
    #[error("Default option schema has no purchasable option")]
    MissingDefaultOption,

    /// No selection line exists for the option.
    #[error("Selection line not found: {0}")]
    LineNotFound(OptionNo),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Purchase confirmation is not permitted in the current state.
    #[error("Purchase not allowed: {0}")]
    ConfirmNotAllowed(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CommerceError {
    /// Whether this error is an expected, recoverable miss rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CommerceError::OptionNotFound { .. } | CommerceError::LineNotFound(_)
        )
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
