//! Catalog entities: listing items, categories, and the full product card.

use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ProductId};
use crate::types::price::Price;

/// One item of the browsable catalog (or the top-sales strip).
///
/// Read-only and server-sourced; a fetched page is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Ordered image URLs; the first one is the card picture.
    #[serde(default)]
    pub images: Vec<String>,
}

/// A catalog category used as a listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
}

/// One selectable size on a product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub size: String,
    pub available: bool,
}

/// The full product card fetched for a single product id.
///
/// The string attributes are optional on the wire; absent values render as
/// an em-dash placeholder rather than an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub category: CategoryId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
}

impl ProductDetail {
    /// Sizes that can actually be put in the cart.
    pub fn available_sizes(&self) -> impl Iterator<Item = &SizeOption> {
        self.sizes.iter().filter(|s| s.available)
    }

    /// Whether any size at all is in stock.
    #[must_use]
    pub fn has_available_sizes(&self) -> bool {
        self.available_sizes().next().is_some()
    }

    /// The primary image, if the server sent any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
