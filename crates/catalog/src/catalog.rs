//! Catalog query contract and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::error::CatalogError;
use crate::product::{Product, SourceListing};

/// Trait for read-only product catalog queries.
///
/// The storefront only ever lists; creation and pricing happen upstream in
/// the sourcing job.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns up to `limit` products, newest first (descending id).
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, CatalogError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: Vec<Product>,
    next_id: i64,
}

/// In-memory catalog, seeded by the sourcing job or by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates a sourced listing, keyed by its source URL.
    ///
    /// A listing already present keeps its id and takes the new payload;
    /// a new listing is assigned the next id. Returns the product id.
    pub async fn upsert(&self, listing: SourceListing) -> ProductId {
        let mut state = self.state.write().await;

        if let Some(existing) = state
            .products
            .iter_mut()
            .find(|p| p.source_url == listing.source_url)
        {
            let id = existing.id;
            *existing = listing.into_product(id);
            return id;
        }

        state.next_id += 1;
        let id = ProductId::new(state.next_id);
        let product = listing.into_product(id);
        state.products.push(product);
        id
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        let state = self.state.read().await;
        let mut products = state.products.clone();
        products.sort_by(|a, b| b.id.cmp(&a.id));
        products.truncate(limit);
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    fn listing(name: &str, url: &str) -> SourceListing {
        SourceListing {
            name: name.to_string(),
            source_price: Money::from_cents(400),
            image_url: format!("https://img.example/{name}.png"),
            source_url: url.to_string(),
            description: None,
            rating: None,
        }
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let catalog = InMemoryCatalog::new();
        catalog.upsert(listing("first", "https://s.example/1")).await;
        catalog.upsert(listing("second", "https://s.example/2")).await;
        catalog.upsert(listing("third", "https://s.example/3")).await;

        let products = catalog.list_products(10).await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_listing_honors_limit() {
        let catalog = InMemoryCatalog::new();
        for i in 0..15 {
            catalog
                .upsert(listing(&format!("p{i}"), &format!("https://s.example/{i}")))
                .await;
        }

        let products = catalog.list_products(10).await.unwrap();
        assert_eq!(products.len(), 10);
        assert_eq!(products[0].name, "p14");
    }

    #[tokio::test]
    async fn test_upsert_by_source_url_keeps_id() {
        let catalog = InMemoryCatalog::new();
        let id = catalog.upsert(listing("mug", "https://s.example/mug")).await;

        let mut updated = listing("mug (restocked)", "https://s.example/mug");
        updated.source_price = Money::from_cents(500);
        let same_id = catalog.upsert(updated).await;

        assert_eq!(id, same_id);
        assert_eq!(catalog.product_count().await, 1);

        let products = catalog.list_products(10).await.unwrap();
        assert_eq!(products[0].name, "mug (restocked)");
        assert_eq!(products[0].price.cents(), 1250);
    }
}
