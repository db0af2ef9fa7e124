//! Catalog handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use sunbag_core::{CategoryFilter, Product, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// `all`, `kits`, `batteries` or `accessoires`. Defaults to all.
    pub category: Option<String>,
    /// Free-text query matched against names and descriptions.
    #[serde(default)]
    pub q: String,
}

/// Filtered products, in catalog order.
///
/// # Errors
///
/// Returns 400 for an unknown category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = match query.category.as_deref() {
        None | Some("") => CategoryFilter::All,
        Some(raw) => raw
            .parse::<CategoryFilter>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
    };

    let products = state
        .catalog()
        .filter(filter, &query.q)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(products))
}

/// One product.
///
/// # Errors
///
/// Returns 404 if no product has this ID.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    state
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(id.into_inner()))
}
