//! Cart engine.
//!
//! [`Cart`] is a plain value: an ordered list of lines with at most one line
//! per product id and every quantity at least 1. [`CartEngine`] pairs a cart
//! with the visitor's store and writes it back after every mutation.

use std::sync::Arc;

use serde::Serialize;
use sunbag_core::{CartItem, Product, format_euros};

use crate::storage::{KeyValueStore, keys, load_json};

/// The visitor's working selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from stored lines.
    ///
    /// Lines with quantity 0 are dropped and repeated product ids are merged
    /// into the first occurrence, so the cart invariants hold even for
    /// hand-edited storage.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|i| i.qty > 0) {
            match cart.items.iter_mut().find(|line| line.id() == item.id()) {
                Some(line) => line.qty = line.qty.saturating_add(item.qty),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same id is incremented and keeps its own
    /// product data; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|line| line.id() == &product.id) {
            Some(line) => line.qty = line.qty.saturating_add(1),
            None => self.items.push(CartItem::new(product.clone())),
        }
    }

    /// Remove the line at `index`. Out-of-range indices are ignored.
    ///
    /// Returns whether a line was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .map(|i| i.qty)
            .fold(0, u32::saturating_add)
    }

    /// Sum of `price * qty`, unrounded.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Derived figures for display.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let total = self.total();
        CartSummary {
            items: self.items.clone(),
            count: self.count(),
            total,
            total_display: format_euros(total),
        }
    }
}

/// What the presentation layer needs to render the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub count: u32,
    pub total: f64,
    pub total_display: String,
}

/// A cart mirrored to a key-value store.
pub struct CartEngine {
    cart: Cart,
    store: Arc<dyn KeyValueStore>,
}

impl CartEngine {
    /// Rehydrate the cart from `store`.
    ///
    /// A missing entry gives an empty cart. So does an unreadable or
    /// malformed one, after logging it.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let cart = match load_json::<Vec<CartItem>>(store.as_ref(), keys::CART) {
            Ok(Some(items)) => Cart::from_items(items),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored cart is unreadable, starting empty");
                Cart::new()
            }
        };
        Self { cart, store }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add(&mut self, product: &Product) {
        self.cart.add(product);
        self.save();
    }

    /// Remove the line at `index`; stale indices are a no-op.
    pub fn remove(&mut self, index: usize) {
        if !self.cart.remove(index) {
            tracing::debug!(index, len = self.cart.items().len(), "Ignoring stale cart index");
        }
        self.save();
    }

    /// Empty the cart and erase its storage entry.
    pub fn clear(&mut self) {
        self.cart = Cart::new();
        self.save();
    }

    /// Write the current cart to the store.
    ///
    /// An empty cart removes the entry. Failures are logged, never returned:
    /// the in-memory cart stays authoritative.
    pub fn save(&self) {
        let result = if self.cart.is_empty() {
            self.store.remove(keys::CART)
        } else {
            crate::storage::save_json(self.store.as_ref(), keys::CART, &self.cart)
        };
        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use sunbag_core::{Category, Price, ProductId};

    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::MemoryStore;

    fn item(id: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_uppercase(),
            description: String::new(),
            price: Price::new(price),
            category: Category::Battery,
            images: Vec::new(),
            specs: Vec::new(),
            badges: Vec::new(),
            in_stock: true,
            long_description: None,
            features: Vec::new(),
            technical_specs: None,
        }
    }

    #[test]
    fn test_add_merges_by_id() {
        let mut cart = Cart::new();
        let a = item("a", 10.0);
        let b = item("b", 5.0);
        for p in [&a, &b, &a, &a, &b] {
            cart.add(p);
        }
        let lines: Vec<(&str, u32)> = cart
            .items()
            .iter()
            .map(|i| (i.id().as_str(), i.qty))
            .collect();
        assert_eq!(lines, vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_add_keeps_existing_line_data() {
        let mut cart = Cart::new();
        cart.add(&item("a", 10.0));
        cart.add(&item("a", 99.0));
        assert_eq!(cart.total(), 20.0);
    }

    #[test]
    fn test_scenario_two_a_one_b_then_remove_first() {
        let mut cart = Cart::new();
        let a = item("a", 10.0);
        let b = item("b", 5.0);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), 25.0);

        assert!(cart.remove(0));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id().as_str(), "b");
        assert_eq!(cart.total(), 5.0);
    }

    #[test]
    fn test_remove_preserves_order_and_ignores_out_of_range() {
        let mut cart = Cart::new();
        for id in ["a", "b", "c"] {
            cart.add(&item(id, 1.0));
        }
        assert!(cart.remove(1));
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert!(!cart.remove(2));
        assert!(!cart.remove(usize::MAX));
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.summary().total_display, "0.00 €");
    }

    #[test]
    fn test_total_is_unrounded() {
        let mut cart = Cart::new();
        cart.add(&item("a", 0.1));
        cart.add(&item("b", 0.2));
        assert_eq!(cart.total(), 0.1 + 0.2);
        assert_eq!(cart.summary().total_display, "0.30 €");
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let a = item("a", 1.0);
        let items = vec![
            CartItem { product: a.clone(), qty: 2 },
            CartItem { product: item("b", 1.0), qty: 0 },
            CartItem { product: a, qty: 1 },
        ];
        let cart = Cart::from_items(items);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_engine_persists_every_mutation() {
        let store = Arc::new(MemoryStore::new());
        let catalog = Catalog::builtin();
        let product = &catalog.products()[0];

        let mut engine = CartEngine::load(store.clone());
        engine.add(product);
        engine.add(product);

        let reloaded = CartEngine::load(store.clone());
        assert_eq!(reloaded.count(), 2);
        assert_eq!(reloaded.cart(), engine.cart());

        engine.remove(0);
        assert!(store.get(keys::CART).unwrap().is_none());
        assert_eq!(CartEngine::load(store).count(), 0);
    }

    #[test]
    fn test_engine_clear_removes_entry() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = CartEngine::load(store.clone());
        engine.add(&item("a", 3.0));
        assert!(store.get(keys::CART).unwrap().is_some());

        engine.clear();
        assert!(engine.cart().is_empty());
        assert!(store.get(keys::CART).unwrap().is_none());
        assert!(CartEngine::load(store).cart().is_empty());
    }

    #[test]
    fn test_engine_malformed_store_fails_closed() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CART, "{not json").unwrap();
        let engine = CartEngine::load(store);
        assert!(engine.cart().is_empty());
        assert_eq!(engine.total(), 0.0);
    }

    #[test]
    fn test_engine_reads_legacy_shape() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                keys::CART,
                r#"[{"id":"batt-fr","name":"La Française 10K","description":"d","price":17.29,
                    "category":"batteries","imageColor":"bg-white","images":[],"specs":[],
                    "badges":[],"inStock":true,"qty":2}]"#,
            )
            .unwrap();
        let engine = CartEngine::load(store);
        assert_eq!(engine.count(), 2);
        assert_eq!(engine.total(), 17.29 * 2.0);
    }

    #[test]
    fn test_engine_count_saturates_on_huge_stored_quantities() {
        let store = Arc::new(MemoryStore::new());
        let line = |id: &str, qty: u32| {
            serde_json::to_value(CartItem {
                product: item(id, 1.0),
                qty,
            })
            .unwrap()
        };
        let stored = serde_json::json!([line("a", u32::MAX), line("b", 1)]);
        store.set(keys::CART, &stored.to_string()).unwrap();

        let engine = CartEngine::load(store);
        assert_eq!(engine.cart().items().len(), 2);
        assert_eq!(engine.count(), u32::MAX);
        assert_eq!(engine.cart().summary().count, u32::MAX);
    }
}
