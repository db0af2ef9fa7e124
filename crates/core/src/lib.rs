//! SUNBAG Core - Shared types library.
//!
//! This crate provides the domain types used across the SUNBAG storefront:
//! - `storefront` - Cart engine, catalog, identity service and JSON API
//! - `integration-tests` - End-to-end tests against the running server
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email, price, products, cart items, users and pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
