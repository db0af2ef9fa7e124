//! Visitor extractor.
//!
//! Maps the cookie session to a [`VisitorId`] (minting one on first
//! contact) and loads that visitor's live [`Storefront`](crate::app::Storefront).

use axum::{extract::FromRequestParts, http::request::Parts};
use sunbag_core::VisitorId;
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::{AppState, VisitorHandle};

/// Session keys.
pub mod session_keys {
    /// Key for the visitor ID.
    pub const VISITOR_ID: &str = "visitor_id";
}

/// The visitor behind the current request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(visitor: Visitor) -> Result<Json<Snapshot>> {
///     let storefront = visitor.handle.lock().await;
///     Ok(Json(storefront.snapshot()))
/// }
/// ```
pub struct Visitor {
    pub id: VisitorId,
    pub handle: VisitorHandle,
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Internal("session layer missing".to_owned()))?;

        let existing: Option<VisitorId> = session
            .get(session_keys::VISITOR_ID)
            .await
            .map_err(|e| AppError::Internal(format!("failed to read session: {e}")))?;

        let id = match existing {
            Some(id) => id,
            None => {
                let id = VisitorId::generate();
                session
                    .insert(session_keys::VISITOR_ID, id)
                    .await
                    .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;
                tracing::info!(visitor_id = %id, "New visitor");
                id
            }
        };

        tracing::Span::current().record("visitor_id", tracing::field::display(id));
        let handle = state.visitor(id).await?;
        Ok(Self { id, handle })
    }
}
