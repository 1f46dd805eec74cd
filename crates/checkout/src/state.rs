//! Checkout submission state machine.

use serde::{Deserialize, Serialize};

/// The state of the checkout orchestrator.
///
/// State transitions:
/// ```text
/// Idle ──► Submitting ──┬──► Succeeded
///                       └──► Failed
/// ```
/// Both terminal reports re-enter the accepting position: after `Succeeded`
/// the modal closes with an empty cart, after `Failed` the user may retry
/// without re-entering items. There is no cancelled-while-submitting state;
/// in-flight steps run to completion or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// No submission has been attempted yet.
    #[default]
    Idle,

    /// The four backend writes are being executed.
    Submitting,

    /// All four writes succeeded and the cart was cleared.
    Succeeded,

    /// A write failed; the cart is untouched and a retry is allowed.
    Failed,
}

impl CheckoutState {
    /// Returns true if a new submission may begin.
    pub fn can_submit(&self) -> bool {
        !matches!(self, CheckoutState::Submitting)
    }

    /// Returns true while backend writes are running.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, CheckoutState::Submitting)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "Idle",
            CheckoutState::Submitting => "Submitting",
            CheckoutState::Succeeded => "Succeeded",
            CheckoutState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
