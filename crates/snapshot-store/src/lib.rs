//! Key-value snapshot persistence for the storefront cart.
//!
//! The cart engine persists its full state as a serialized snapshot under a
//! single logical key after every mutation. This crate defines the storage
//! contract plus an in-memory implementation for tests and a file-backed
//! implementation for durable local storage.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{Result, SnapshotStoreError};
pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use store::SnapshotStore;
