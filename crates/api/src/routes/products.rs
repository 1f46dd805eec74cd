//! Product listing endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use catalog::ProductCatalog;
use checkout::OrderBackend;
use serde::{Deserialize, Serialize};
use snapshot_store::SnapshotStore;

use crate::error::ApiError;
use crate::routes::cart::AppState;

/// Number of products served when the client does not ask for a limit.
const DEFAULT_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct ProductsQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: String,
    pub rating: u8,
}

/// GET /products — newest products first, up to the requested limit.
#[tracing::instrument(skip(state, query))]
pub async fn list<S, B, C>(
    State(state): State<Arc<AppState<S, B, C>>>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiError>
where
    S: SnapshotStore + 'static,
    B: OrderBackend + 'static,
    C: ProductCatalog + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let products = state.catalog.list_products(limit).await?;

    let responses = products
        .into_iter()
        .map(|p| ProductResponse {
            id: p.id.as_i64(),
            name: p.name,
            description: p.description,
            price_cents: p.price.cents(),
            image_url: p.image_url,
            rating: p.rating,
        })
        .collect();

    Ok(Json(responses))
}
