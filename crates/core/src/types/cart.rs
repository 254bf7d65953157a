//! Cart entities.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// One row of the shopping cart.
///
/// Uniqueness is keyed by the `(id, size)` pair - the same product in two
/// sizes occupies two lines. `count` is always at least 1; decrementing a
/// line to zero removes it instead of storing a zero count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Card picture carried over from the product view.
    pub image: String,
    pub size: String,
    pub count: u32,
}

impl CartLine {
    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> (ProductId, &str) {
        (self.id, self.size.as_str())
    }

    /// Whether this line matches the given identity key.
    #[must_use]
    pub fn matches(&self, id: ProductId, size: &str) -> bool {
        self.id == id && self.size == size
    }

    /// Price of the whole line: unit price times count.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.count
    }
}
