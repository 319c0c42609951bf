//! Domain error model.

use thiserror::Error;

/// Result type used across the billing domain.
pub type BillingResult<T> = Result<T, BillingError>;

/// Domain-level error.
///
/// Filtering is permissive and never fails; these variants cover the
/// boundary where raw records enter the domain and the lifecycle actions
/// owned by the invoice source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// An invoice status outside `{draft, sent, paid, overdue}`.
    #[error("invalid invoice status: {0:?}")]
    InvalidStatusValue(String),

    /// A value failed validation (e.g. negative amount, empty id).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A status change that the lifecycle does not offer.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A requested invoice was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected internal failure (e.g. poisoned lock).
    #[error("internal error: {0}")]
    Internal(String),
}

impl BillingError {
    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatusValue(value.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_status_message_quotes_the_raw_value() {
        let err = BillingError::invalid_status("cancelled");
        assert_eq!(err.to_string(), "invalid invoice status: \"cancelled\"");
    }

    #[test]
    fn invalid_transition_names_both_ends() {
        let err = BillingError::invalid_transition("paid", "draft");
        assert_eq!(err.to_string(), "invalid status transition: paid -> draft");
    }
}
