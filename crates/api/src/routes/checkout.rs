//! Checkout submission endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog::ProductCatalog;
use checkout::{OrderBackend, ShippingForm};
use serde::{Deserialize, Serialize};
use snapshot_store::SnapshotStore;

use crate::error::ApiError;
use crate::routes::cart::AppState;

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// The notification surface: a human-readable message plus the receipt.
#[derive(Serialize)]
pub struct CheckoutResponse {
    pub message: &'static str,
    pub order_id: String,
    pub customer_id: String,
    pub amount_cents: i64,
    pub completed_at: String,
}

/// POST /checkout — submit the current cart with a shipping form.
#[tracing::instrument(skip(state, req))]
pub async fn submit<S, B, C>(
    State(state): State<Arc<AppState<S, B, C>>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError>
where
    S: SnapshotStore + 'static,
    B: OrderBackend + 'static,
    C: ProductCatalog + 'static,
{
    let form = ShippingForm {
        full_name: req.full_name,
        email: req.email,
        address: req.address,
        city: req.city,
        postal_code: req.postal_code,
    };

    let receipt = state.checkout.submit(&form, &state.cart).await?;

    Ok(Json(CheckoutResponse {
        message: "Order placed successfully!",
        order_id: receipt.order_id.to_string(),
        customer_id: receipt.customer_id.to_string(),
        amount_cents: receipt.amount.cents(),
        completed_at: receipt.completed_at.to_rfc3339(),
    }))
}
