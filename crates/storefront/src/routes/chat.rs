//! Chat widget handlers.

use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use crate::app::ChatSnapshot;
use crate::middleware::Visitor;

/// Chat message request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Transcript so far. A reply whose delay has elapsed is collected first.
pub async fn show(visitor: Visitor) -> Json<ChatSnapshot> {
    let mut storefront = visitor.handle.lock().await;
    storefront.chat().poll_reply();
    Json(storefront.snapshot().chat)
}

/// Send a message and wait for the assistant's reply.
///
/// Blank messages, and messages sent while a reply is pending, are ignored
/// and the transcript is returned unchanged.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn send(visitor: Visitor, Json(body): Json<ChatRequest>) -> Json<ChatSnapshot> {
    let mut storefront = visitor.handle.lock().await;
    let chat = storefront.chat();
    if chat.send(&body.message) {
        chat.wait_reply().await;
    } else {
        tracing::debug!("Chat message ignored");
    }
    Json(storefront.snapshot().chat)
}

/// Close the widget. A pending reply is dropped for good.
pub async fn close(visitor: Visitor) -> Json<ChatSnapshot> {
    let mut storefront = visitor.handle.lock().await;
    storefront.chat().close();
    Json(storefront.snapshot().chat)
}
