//! Shopping cart engine for the storefront.
//!
//! The [`CartEngine`] owns the authoritative in-memory cart state and
//! synchronizes it with a [`snapshot_store::SnapshotStore`]: rehydration on
//! load, full-snapshot overwrite after every mutation. Totals are derived on
//! every read, never cached.
//!
//! Mutation operations never fail. Persistence problems are logged and the
//! in-memory state stays the source of truth; a snapshot that cannot be read
//! or parsed on load falls back to an empty cart.

pub mod cart;
pub mod engine;
pub mod error;
pub mod item;

pub use cart::Cart;
pub use engine::{CartEngine, DEFAULT_STORAGE_KEY};
pub use error::CartError;
pub use item::{CartItem, ProductInfo};
