//! Catalog products and cart lines.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product category.
///
/// Serialized with the names used by stored carts (`kits`, `batteries`,
/// `accessoires`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "kits")]
    Kit,
    #[serde(rename = "batteries")]
    Battery,
    #[serde(rename = "accessoires")]
    Accessory,
}

impl Category {
    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kit => "kits",
            Self::Battery => "batteries",
            Self::Accessory => "accessoires",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Category`] or [`CategoryFilter`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kits" | "kit" => Ok(Self::Kit),
            "batteries" | "battery" => Ok(Self::Battery),
            "accessoires" | "accessory" => Ok(Self::Accessory),
            other => Err(CategoryParseError(other.to_owned())),
        }
    }
}

/// Category selector on the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product of `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Named technical characteristics shown on the product details tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waterproof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_contents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
}

impl TechnicalSpecs {
    /// Present entries as `(label, value)` pairs in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Marque", &self.brand),
            ("Capacité", &self.capacity),
            ("Entrée", &self.input),
            ("Sortie", &self.output),
            ("Poids", &self.weight),
            ("Dimensions", &self.dimensions),
            ("Étanchéité", &self.waterproof),
            ("Garantie", &self.warranty),
            ("Origine", &self.origin),
            ("Matériaux", &self.material),
            ("Contenu", &self.box_contents),
            ("Caractéristiques", &self.features),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    /// Image paths, first one is the cover.
    pub images: Vec<String>,
    /// Short highlights shown on the shop card.
    pub specs: Vec<String>,
    pub badges: Vec<String>,
    pub in_stock: bool,
    /// Extended description (HTML fragment).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_specs: Option<TechnicalSpecs>,
}

impl Product {
    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// A cart line: the product plus a quantity.
///
/// Serialized flat (`{ ...product, "qty": n }`) so persisted carts keep
/// the shape earlier clients wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub qty: u32,
}

impl CartItem {
    /// New line with quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self { product, qty: 1 }
    }

    /// Identifier used for merging lines.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price * qty`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price.amount() * f64::from(self.qty)
    }
}
