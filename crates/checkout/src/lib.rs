//! Checkout orchestration for the storefront cart.
//!
//! Converts a cart snapshot plus a shipping form into backend order records
//! through four sequential dependent writes:
//! 1. Create customer
//! 2. Create order
//! 3. Create order items
//! 4. Create payment
//!
//! Each step's allocated identifier feeds the next, so the steps never run in
//! parallel. The writes are not wrapped in a transaction; what happens to
//! steps committed before a failure is decided by the configured
//! [`CompensationPolicy`].

pub mod backend;
pub mod error;
pub mod form;
pub mod orchestrator;
pub mod state;
pub mod submission;

pub use backend::{
    BackendError, InMemoryOrderBackend, NewCustomer, NewOrder, NewPayment, OrderBackend,
    OrderItemRow, ShippingAddress,
};
pub use error::CheckoutError;
pub use form::ShippingForm;
pub use orchestrator::{CheckoutOrchestrator, CheckoutReceipt, CompensationPolicy};
pub use state::CheckoutState;
