//! Carousel handlers.
//!
//! These act on the carousel of the page currently rendered: the product
//! gallery on details, the showcase on home. Other pages have none.

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::app::Storefront;
use crate::error::{AppError, Result};
use crate::gallery::{Carousel, ImageDimensions, container_height};
use crate::middleware::Visitor;

/// Select request body.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: usize,
}

/// Hover request body.
#[derive(Debug, Deserialize)]
pub struct HoverRequest {
    pub hovered: bool,
}

/// Autoplay request body.
#[derive(Debug, Deserialize)]
pub struct AutoplayRequest {
    pub enabled: bool,
}

/// Height query parameters. Image dimensions are optional until the image
/// has loaded.
#[derive(Debug, Deserialize)]
pub struct HeightQuery {
    pub width: f64,
    pub image_width: Option<f64>,
    pub image_height: Option<f64>,
}

/// Height response.
#[derive(Debug, Serialize)]
pub struct HeightResponse {
    pub height: f64,
}

fn on_gallery(storefront: &mut Storefront, f: impl FnOnce(&mut Carousel)) -> Result<Json<Carousel>> {
    let page = storefront.view().page();
    if !storefront.with_gallery(f) {
        return Err(AppError::NotFound(format!("aucun carrousel sur la page {page}")));
    }
    storefront
        .snapshot()
        .gallery
        .map(Json)
        .ok_or_else(|| AppError::Internal("gallery vanished".to_owned()))
}

/// Next image, wrapping to the first.
///
/// # Errors
///
/// Returns 404 when the current page shows no carousel.
pub async fn next(visitor: Visitor) -> Result<Json<Carousel>> {
    let mut storefront = visitor.handle.lock().await;
    on_gallery(&mut storefront, Carousel::next)
}

/// Previous image, wrapping to the last.
///
/// # Errors
///
/// Returns 404 when the current page shows no carousel.
pub async fn prev(visitor: Visitor) -> Result<Json<Carousel>> {
    let mut storefront = visitor.handle.lock().await;
    on_gallery(&mut storefront, Carousel::prev)
}

/// Jump to a thumbnail. Out-of-range indices are ignored.
///
/// # Errors
///
/// Returns 404 when the current page shows no carousel.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn select(visitor: Visitor, Json(body): Json<SelectRequest>) -> Result<Json<Carousel>> {
    let mut storefront = visitor.handle.lock().await;
    on_gallery(&mut storefront, |carousel| carousel.select(body.index))
}

/// Pause (or resume) autoplay while the pointer is over the carousel.
///
/// # Errors
///
/// Returns 404 when the current page shows no carousel.
pub async fn hover(visitor: Visitor, Json(body): Json<HoverRequest>) -> Result<Json<Carousel>> {
    let mut storefront = visitor.handle.lock().await;
    on_gallery(&mut storefront, |carousel| carousel.set_hovered(body.hovered))
}

/// Turn automatic advance on or off.
///
/// # Errors
///
/// Returns 404 when the current page shows no carousel.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn autoplay(
    visitor: Visitor,
    Json(body): Json<AutoplayRequest>,
) -> Result<Json<Carousel>> {
    let mut storefront = visitor.handle.lock().await;
    on_gallery(&mut storefront, |carousel| carousel.set_autoplay(body.enabled))
}

/// Container height for a given width and (optional) natural image size.
pub async fn height(Query(query): Query<HeightQuery>) -> Json<HeightResponse> {
    let dims = query
        .image_width
        .zip(query.image_height)
        .map(|(width, height)| ImageDimensions { width, height });
    Json(HeightResponse {
        height: container_height(query.width, dims),
    })
}
