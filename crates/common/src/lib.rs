//! Shared types for the storefront cart system.
//!
//! Identifier newtypes and the fixed-point `Money` type used across the
//! cart, checkout, and catalog crates.

pub mod ids;
pub mod money;

pub use ids::{CustomerId, OrderId, ProductId};
pub use money::Money;
