//! HTTP route handlers for the storefront API.
//!
//! Every `/api` handler works on the calling visitor's [`Storefront`]
//! (resolved by the [`Visitor`] extractor) and answers with JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//!
//! # Application
//! POST /api/boot                - Application start (rehydrate, land on home)
//! GET  /api/state               - Full snapshot
//! POST /api/navigate            - Go to a page         {page}
//! POST /api/view                - Open product details {product_id}
//! POST /api/search              - Header search        {query}
//!
//! # Catalog
//! GET  /api/catalog             - Filtered products    ?category=&q=
//! GET  /api/products/{id}       - One product
//!
//! # Cart
//! GET  /api/cart                - Cart summary
//! POST /api/cart/add            - Add one unit         {product_id}
//! POST /api/cart/remove         - Remove a line        {index}
//! POST /api/cart/open           - Open the drawer
//! POST /api/cart/close          - Close the drawer
//! POST /api/checkout            - Simulated checkout
//!
//! # Auth (register/login rate limited)
//! POST /api/auth/register       - Create account       {name, email, password}
//! POST /api/auth/login          - Log in               {email, password}
//! POST /api/auth/logout         - Log out
//! GET  /api/auth/session        - Logged-in user, if any
//!
//! # Chat
//! GET  /api/chat                - Transcript and loading flag
//! POST /api/chat                - Send a message, wait for the reply {message}
//! POST /api/chat/close          - Drop any pending reply
//!
//! # Gallery (carousel of the current page)
//! POST /api/gallery/next        - Next image
//! POST /api/gallery/prev        - Previous image
//! POST /api/gallery/select      - Jump to an image     {index}
//! POST /api/gallery/hover       - Pause on hover       {hovered}
//! POST /api/gallery/autoplay    - Play/pause toggle    {enabled}
//! GET  /api/gallery/height      - Container height     ?width=&image_width=&image_height=
//! ```
//!
//! [`Storefront`]: crate::app::Storefront
//! [`Visitor`]: crate::middleware::Visitor

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod gallery;
pub mod health;
pub mod nav;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    let limited = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter());

    Router::new()
        .merge(limited)
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
}

/// Create the gallery routes router.
pub fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/next", post(gallery::next))
        .route("/prev", post(gallery::prev))
        .route("/select", post(gallery::select))
        .route("/hover", post(gallery::hover))
        .route("/autoplay", post(gallery::autoplay))
        .route("/height", get(gallery::height))
}

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Application
        .route("/boot", post(nav::boot))
        .route("/state", get(nav::state))
        .route("/navigate", post(nav::navigate))
        .route("/view", post(nav::view))
        .route("/search", post(nav::search))
        // Catalog
        .route("/catalog", get(catalog::index))
        .route("/products/{id}", get(catalog::show))
        // Cart
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        // Auth
        .nest("/auth", auth_routes())
        // Widgets
        .route("/chat", get(chat::show).post(chat::send))
        .route("/chat/close", post(chat::close))
        .nest("/gallery", gallery_routes())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes())
}
