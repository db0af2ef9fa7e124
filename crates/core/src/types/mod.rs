//! Core types for the SUNBAG storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod page;
pub mod price;
pub mod product;
pub mod user;

pub use email::{Email, EmailError};
pub use id::*;
pub use page::{Page, PageParseError};
pub use price::{Price, format_euros};
pub use product::{CartItem, Category, CategoryFilter, CategoryParseError, Product, TechnicalSpecs};
pub use user::{PublicUser, User};
