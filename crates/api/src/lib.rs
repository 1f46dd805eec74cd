//! HTTP storefront API over the cart and checkout core.
//!
//! Exposes the product grid, cart mutations, and checkout submission as REST
//! endpoints, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use cart::CartEngine;
use catalog::{InMemoryCatalog, ProductCatalog};
use checkout::{CheckoutOrchestrator, InMemoryOrderBackend, OrderBackend};
use metrics_exporter_prometheus::PrometheusHandle;
use snapshot_store::SnapshotStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::cart::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, B, C>(state: Arc<AppState<S, B, C>>, metrics_handle: PrometheusHandle) -> Router
where
    S: SnapshotStore + 'static,
    B: OrderBackend + 'static,
    C: ProductCatalog + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", get(routes::products::list::<S, B, C>))
        .route("/cart", get(routes::cart::get::<S, B, C>))
        .route("/cart", delete(routes::cart::clear::<S, B, C>))
        .route("/cart/items", post(routes::cart::add_item::<S, B, C>))
        .route(
            "/cart/items/{id}",
            delete(routes::cart::remove_item::<S, B, C>),
        )
        .route("/checkout", post(routes::checkout::submit::<S, B, C>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over the given snapshot store.
///
/// Returns the backend and catalog handles alongside the state so callers
/// can seed products or inject faults.
pub fn create_default_state<S: SnapshotStore + 'static>(
    store: S,
    cart_key: &str,
) -> (
    Arc<AppState<S, InMemoryOrderBackend, InMemoryCatalog>>,
    InMemoryOrderBackend,
    InMemoryCatalog,
) {
    let cart = CartEngine::with_storage_key(store, cart_key);
    let backend = InMemoryOrderBackend::new();
    let catalog = InMemoryCatalog::new();

    let state = Arc::new(AppState {
        cart,
        checkout: CheckoutOrchestrator::new(backend.clone()),
        catalog: catalog.clone(),
    });

    (state, backend, catalog)
}
