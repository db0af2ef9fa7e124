//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (nosniff, frame denial, no caching)
//! 5. Session layer (tower-sessions cookie carrying the visitor ID)
//! 6. Rate limiting on register/login (governor)
//!
//! The [`Visitor`] extractor then resolves the cookie session to the
//! visitor's live state.

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod visitor;

pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use visitor::Visitor;
