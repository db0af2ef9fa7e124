//! Application-level handlers: boot, snapshot and navigation.

use axum::{Json, extract::State};
use serde::Deserialize;
use sunbag_core::{Page, ProductId};
use tracing::instrument;

use crate::app::{Snapshot, Storefront};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::state::AppState;

/// Navigate request body.
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}

/// View product request body.
#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub product_id: ProductId,
}

/// Search request body.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Application start for this visitor.
///
/// Rebuilds the visitor's state from its store, exactly like a page reload:
/// cart and session are rehydrated, navigation starts over on home, the cart
/// drawer is closed and the chat transcript is fresh.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn boot(visitor: Visitor) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    let (store, registry, timings) = (
        storefront.store(),
        storefront.registry(),
        storefront.timings(),
    );
    *storefront = Storefront::boot(store, registry, timings);
    tracing::debug!("Visitor rebooted");
    Json(storefront.snapshot())
}

/// Everything the client needs to render.
pub async fn state(visitor: Visitor) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    storefront.chat().poll_reply();
    Json(storefront.snapshot())
}

/// Go to a page.
///
/// Guards apply when rendering: details without a selection shows the shop,
/// account without a session shows login. The snapshot reports both the
/// rendered and the requested page.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn navigate(visitor: Visitor, Json(body): Json<NavigateRequest>) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    storefront.navigate(body.page);
    Json(storefront.snapshot())
}

/// Open a product's details page.
///
/// # Errors
///
/// Returns 404 if the product is not in the catalog.
#[instrument(skip(state, visitor), fields(visitor_id = %visitor.id))]
pub async fn view(
    State(state): State<AppState>,
    visitor: Visitor,
    Json(body): Json<ViewRequest>,
) -> Result<Json<Snapshot>> {
    let product = state
        .catalog()
        .get(&body.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(body.product_id.to_string()))?;

    add_breadcrumb("navigation", "Viewed product", Some(&[("product_id", product.id.as_str())]));

    let mut storefront = visitor.handle.lock().await;
    storefront.view_product(product);
    Ok(Json(storefront.snapshot()))
}

/// Header search: go to the shop with the query applied.
///
/// Blank queries leave the state untouched.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn search(visitor: Visitor, Json(body): Json<SearchRequest>) -> Json<Snapshot> {
    let mut storefront = visitor.handle.lock().await;
    storefront.search(body.query);
    Json(storefront.snapshot())
}
