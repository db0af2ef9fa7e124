//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account registration, login and the visitor's session marker
pub mod auth;
