//! Product catalog.
//!
//! The catalog is a fixed list compiled into the binary and built once on
//! first use. Filtering is pure and cheap enough to run on every keystroke.

mod data;

use std::sync::LazyLock;

use sunbag_core::{CategoryFilter, Product, ProductId};

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(data::products()));

/// An ordered, immutable set of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The SUNBAG range shipped with the storefront.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in `category` whose name or description contains `query`.
    ///
    /// The query is compared case-insensitively and is not trimmed. An empty
    /// query matches every product. Output keeps catalog order.
    #[must_use]
    pub fn filter(&self, category: CategoryFilter, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| category.matches(p.category) && p.matches_query(&needle))
            .collect()
    }
}
