//! Cart handlers.
//!
//! Every mutation is persisted to the visitor's store before the response
//! is sent, so a reload (or a cache eviction) sees the same cart.

use axum::{Json, extract::State};
use serde::Deserialize;
use sunbag_core::ProductId;
use tracing::instrument;

use crate::app::Snapshot;
use crate::cart::CartSummary;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Remove from cart request body.
///
/// Signed so that a negative index is a harmless no-op like any other
/// out-of-range index.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub index: i64,
}

/// Current cart contents and totals.
pub async fn show(visitor: Visitor) -> Json<CartSummary> {
    let storefront = visitor.handle.lock().await;
    Json(storefront.cart().summary())
}

/// Add one unit of a product and open the cart drawer.
///
/// # Errors
///
/// Returns 404 if the product is not in the catalog.
#[instrument(skip(state, visitor), fields(visitor_id = %visitor.id))]
pub async fn add(
    State(state): State<AppState>,
    visitor: Visitor,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<Snapshot>> {
    let product = state
        .catalog()
        .get(&body.product_id)
        .ok_or_else(|| AppError::NotFound(body.product_id.to_string()))?;

    let mut storefront = visitor.handle.lock().await;
    storefront.add_to_cart(product);
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product.id.as_str())]));
    Ok(Json(storefront.snapshot()))
}

/// Remove the line at `index`. Stale indices are ignored.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn remove(visitor: Visitor, Json(body): Json<RemoveFromCartRequest>) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    match usize::try_from(body.index) {
        Ok(index) => storefront.remove_from_cart(index),
        Err(_) => tracing::debug!(index = body.index, "Ignoring negative cart index"),
    }
    Json(storefront.snapshot())
}

/// Open the cart drawer.
pub async fn open(visitor: Visitor) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    storefront.open_cart();
    Json(storefront.snapshot())
}

/// Close the cart drawer.
pub async fn close(visitor: Visitor) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    storefront.close_cart();
    Json(storefront.snapshot())
}

/// Simulated checkout: the cart is emptied and the success page shown.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn checkout(visitor: Visitor) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    let total = storefront.cart().total();
    storefront.checkout();
    tracing::info!(total, "Checkout completed");
    add_breadcrumb("cart", "Checkout", None);
    Json(storefront.snapshot())
}
