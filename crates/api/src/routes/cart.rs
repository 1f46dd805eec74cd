//! Cart read and mutation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use cart::{CartEngine, ProductInfo};
use catalog::ProductCatalog;
use checkout::{CheckoutOrchestrator, OrderBackend};
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};
use snapshot_store::SnapshotStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S: SnapshotStore, B: OrderBackend, C: ProductCatalog> {
    pub cart: CartEngine<S>,
    pub checkout: CheckoutOrchestrator<B>,
    pub catalog: C,
}

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: i64,
    pub name: String,
    pub unit_price_cents: i64,
    pub image: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartItemResponse {
    pub product_id: i64,
    pub name: String,
    pub unit_price_cents: i64,
    pub image: String,
    pub quantity: u32,
    pub line_total_cents: i64,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub total_cents: i64,
    pub item_count: u32,
}

/// Renders the engine's current state as a response body.
pub async fn cart_response<S: SnapshotStore>(cart: &CartEngine<S>) -> CartResponse {
    let items = cart
        .snapshot()
        .await
        .into_iter()
        .map(|item| CartItemResponse {
            product_id: item.product_id.as_i64(),
            name: item.name.clone(),
            unit_price_cents: item.unit_price.cents(),
            image: item.image.clone(),
            quantity: item.quantity,
            line_total_cents: item.line_total().cents(),
        })
        .collect();

    CartResponse {
        items,
        total_cents: cart.total().await.cents(),
        item_count: cart.item_count().await,
    }
}

// -- Handlers --

/// GET /cart — current items plus derived totals.
#[tracing::instrument(skip(state))]
pub async fn get<S, B, C>(State(state): State<Arc<AppState<S, B, C>>>) -> Json<CartResponse>
where
    S: SnapshotStore + 'static,
    B: OrderBackend + 'static,
    C: ProductCatalog + 'static,
{
    Json(cart_response(&state.cart).await)
}

/// POST /cart/items — add one unit of a product.
#[tracing::instrument(skip(state, req))]
pub async fn add_item<S, B, C>(
    State(state): State<Arc<AppState<S, B, C>>>,
    Json(req): Json<AddItemRequest>,
) -> (axum::http::StatusCode, Json<CartResponse>)
where
    S: SnapshotStore + 'static,
    B: OrderBackend + 'static,
    C: ProductCatalog + 'static,
{
    let product = ProductInfo::new(
        req.product_id,
        req.name,
        Money::from_cents(req.unit_price_cents),
        req.image,
    );
    state.cart.add_item(product).await;

    (
        axum::http::StatusCode::CREATED,
        Json(cart_response(&state.cart).await),
    )
}

/// DELETE /cart/items/:id — remove a line. Absent ids are a no-op.
#[tracing::instrument(skip(state))]
pub async fn remove_item<S, B, C>(
    State(state): State<Arc<AppState<S, B, C>>>,
    Path(id): Path<i64>,
) -> Json<CartResponse>
where
    S: SnapshotStore + 'static,
    B: OrderBackend + 'static,
    C: ProductCatalog + 'static,
{
    state.cart.remove_item(ProductId::new(id)).await;
    Json(cart_response(&state.cart).await)
}

/// DELETE /cart — clear all lines.
#[tracing::instrument(skip(state))]
pub async fn clear<S, B, C>(State(state): State<Arc<AppState<S, B, C>>>) -> Json<CartResponse>
where
    S: SnapshotStore + 'static,
    B: OrderBackend + 'static,
    C: ProductCatalog + 'static,
{
    state.cart.clear().await;
    Json(cart_response(&state.cart).await)
}
