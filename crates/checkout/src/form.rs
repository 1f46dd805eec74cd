//! Shipping form captured for the duration of one checkout attempt.

use crate::error::CheckoutError;

/// Shipping details entered at checkout.
///
/// Transient input: captured per attempt, handed to the backend as part of
/// the customer record, and never persisted with the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl ShippingForm {
    /// Validates that every field is filled in and the email has a plausible shape.
    ///
    /// Runs before any backend write so a bad form never causes a partial
    /// submission.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        Self::require("full_name", &self.full_name)?;
        Self::require("email", &self.email)?;
        Self::require("address", &self.address)?;
        Self::require("city", &self.city)?;
        Self::require("postal_code", &self.postal_code)?;

        if !is_plausible_email(self.email.trim()) {
            return Err(CheckoutError::Validation {
                field: "email",
                reason: "must look like an email address",
            });
        }
        Ok(())
    }

    fn require(field: &'static str, value: &str) -> Result<(), CheckoutError> {
        if value.trim().is_empty() {
            return Err(CheckoutError::Validation {
                field,
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

/// Basic address-shape check: `local@domain` with a dotted domain.
///
/// Deliberately loose; the backend owns real address verification.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}
