//! Request ID middleware for request tracing and correlation.
//!
//! Each request carries an ID, either forwarded by a proxy or generated
//! here. It is recorded on the tracing span, tagged on the Sentry scope and
//! echoed back in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID we accept as-is.
const MAX_FORWARDED_LEN: usize = 128;

/// Reuse a sane upstream request ID, otherwise mint a UUID v4.
fn request_id_from(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_FORWARDED_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_from(&request);

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request(header: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/health");
        if let Some(value) = header {
            builder = builder.header(REQUEST_ID_HEADER, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_forwarded_id_is_kept() {
        assert_eq!(request_id_from(&request(Some("cf-abc-123"))), "cf-abc-123");
    }

    #[test]
    fn test_missing_or_oversized_id_is_replaced() {
        let fresh = request_id_from(&request(None));
        assert!(Uuid::parse_str(&fresh).is_ok());

        let huge = "x".repeat(MAX_FORWARDED_LEN + 1);
        let replaced = request_id_from(&request(Some(&huge)));
        assert!(Uuid::parse_str(&replaced).is_ok());
    }
}
