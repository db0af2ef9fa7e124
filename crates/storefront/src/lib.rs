//! SUNBAG storefront library.
//!
//! The storefront of a solar-power brand for hikers: product catalog, a
//! persisted cart, mock accounts, page navigation with guards, a rule-based
//! chat assistant and image carousels. Each browser (visitor) gets its own
//! [`app::Storefront`], served as a JSON API by [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod gallery;
pub mod middleware;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod task;

use axum::{Router, body::Body, http::Request};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full router with its middleware stack.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so
/// the auth rate limiter can key on the peer address when no proxy header
/// is present.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                    visitor_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
