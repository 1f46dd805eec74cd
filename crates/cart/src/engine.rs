//! The cart engine: owned state, persistence discipline, derived reads.

use common::{Money, ProductId};
use snapshot_store::SnapshotStore;
use tokio::sync::RwLock;

use crate::cart::Cart;
use crate::error::CartError;
use crate::item::{CartItem, ProductInfo};

/// The logical key the cart snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Owns the authoritative in-memory cart and its persisted snapshot.
///
/// All mutation flows through this engine; no other component touches the
/// collection directly. Every mutation is followed by a full-snapshot
/// overwrite of the store. Cart sizes are small and mutations are not on a
/// hot path, so there is no diffing or write coalescing.
///
/// Mutation operations never return errors: inputs are sanitized on the way
/// in, and persistence failures are logged and swallowed.
pub struct CartEngine<S: SnapshotStore> {
    cart: RwLock<Cart>,
    store: S,
    storage_key: String,
}

impl<S: SnapshotStore> CartEngine<S> {
    /// Creates an engine with an empty cart under the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_storage_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Creates an engine persisting under a caller-chosen storage key.
    pub fn with_storage_key(store: S, storage_key: impl Into<String>) -> Self {
        Self {
            cart: RwLock::new(Cart::new()),
            store,
            storage_key: storage_key.into(),
        }
    }

    /// Rehydrates the cart from the persisted snapshot.
    ///
    /// Fails soft: a missing key, a read error, or malformed content all
    /// leave the engine with an empty cart. Intended to run once at session
    /// initialization, before the first mutation.
    pub async fn load(&self) {
        match self.read_snapshot().await {
            Ok(Some(cart)) => {
                let items = cart.len();
                *self.cart.write().await = cart;
                tracing::info!(lines = items, "cart rehydrated from storage");
            }
            Ok(None) => {
                *self.cart.write().await = Cart::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load cart snapshot, starting empty");
                metrics::counter!("cart_load_failures_total").increment(1);
                *self.cart.write().await = Cart::new();
            }
        }
    }

    /// Adds one unit of `product`, merging by product id.
    pub async fn add_item(&self, product: ProductInfo) {
        let id = product.id;
        let snapshot = {
            let mut cart = self.cart.write().await;
            cart.add(product);
            cart.to_json()
        };
        metrics::counter!("cart_items_added_total").increment(1);
        tracing::debug!(product_id = %id, "item added to cart");
        self.persist(snapshot).await;
    }

    /// Removes the line with the given id. Absent ids are a no-op.
    pub async fn remove_item(&self, id: ProductId) -> bool {
        let (removed, snapshot) = {
            let mut cart = self.cart.write().await;
            let removed = cart.remove(id);
            (removed, cart.to_json())
        };
        if removed {
            metrics::counter!("cart_items_removed_total").increment(1);
            tracing::debug!(product_id = %id, "item removed from cart");
        }
        self.persist(snapshot).await;
        removed
    }

    /// Empties the cart unconditionally.
    pub async fn clear(&self) {
        let snapshot = {
            let mut cart = self.cart.write().await;
            cart.clear();
            cart.to_json()
        };
        metrics::counter!("cart_cleared_total").increment(1);
        self.persist(snapshot).await;
    }

    /// Clones the current ordered line set.
    pub async fn snapshot(&self) -> Vec<CartItem> {
        self.cart.read().await.snapshot()
    }

    /// Derived sum of line totals.
    pub async fn total(&self) -> Money {
        self.cart.read().await.total()
    }

    /// Derived sum of quantities.
    pub async fn item_count(&self) -> u32 {
        self.cart.read().await.item_count()
    }

    /// Returns true if the cart holds no lines.
    pub async fn is_empty(&self) -> bool {
        self.cart.read().await.is_empty()
    }

    async fn read_snapshot(&self) -> Result<Option<Cart>, CartError> {
        match self.store.read(&self.storage_key).await? {
            Some(raw) => Ok(Some(Cart::from_json(&raw)?)),
            None => Ok(None),
        }
    }

    /// Writes a serialized snapshot, logging instead of propagating failures.
    async fn persist(&self, snapshot: serde_json::Result<String>) {
        let result: Result<(), CartError> = async {
            let json = snapshot?;
            self.store.write(&self.storage_key, &json).await?;
            Ok(())
        }
        .await;

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist cart snapshot");
            metrics::counter!("cart_persist_failures_total").increment(1);
        }
    }
}
