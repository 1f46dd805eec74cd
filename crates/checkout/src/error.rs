//! Checkout error types.

use thiserror::Error;

/// Errors that can terminate a checkout submission.
///
/// `submit` always ends in either a receipt or one of these; it never leaves
/// a failure unreported.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The shipping form failed validation; no backend call was made.
    #[error("Validation failed for {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// The cart snapshot was empty; no backend call was made.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A backend write failed. Steps committed before it are preserved or
    /// rolled back according to the configured compensation policy.
    #[error("Checkout step '{step}' failed: {reason}")]
    Backend { step: &'static str, reason: String },

    /// A submission is already running on this orchestrator.
    #[error("A checkout submission is already in flight")]
    SubmissionInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_human_readable() {
        let err = CheckoutError::Validation {
            field: "email",
            reason: "must look like an email address",
        };
        assert_eq!(
            err.to_string(),
            "Validation failed for email: must look like an email address"
        );

        let err = CheckoutError::Backend {
            step: "create_order",
            reason: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Checkout step 'create_order' failed: connection reset"
        );
    }
}
