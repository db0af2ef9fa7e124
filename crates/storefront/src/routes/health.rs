//! Liveness endpoint.

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Storage is checked lazily by the
/// requests that touch it.
pub async fn health() -> &'static str {
    "ok"
}
