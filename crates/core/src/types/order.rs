//! Checkout order request and response bodies.
//!
//! These types exist only for the duration of a submission call; nothing
//! here is persisted.

use serde::{Deserialize, Serialize};

use crate::types::cart::CartLine;
use crate::types::id::ProductId;
use crate::types::phone::Phone;
use crate::types::price::Price;

/// Buyer contact details for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOwner {
    pub phone: Phone,
    pub address: String,
}

/// One purchased position inside an [`OrderRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub price: Price,
    pub count: u32,
}

/// The JSON body POSTed to `/api/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub owner: OrderOwner,
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    /// Build an order from the current cart lines, preserving line order.
    #[must_use]
    pub fn from_lines(owner: OrderOwner, lines: &[CartLine]) -> Self {
        Self {
            owner,
            items: lines
                .iter()
                .map(|line| OrderItem {
                    id: line.id,
                    price: line.price,
                    count: line.count,
                })
                .collect(),
        }
    }
}

/// Whatever the server answers on a successful submission.
///
/// The endpoint may legitimately reply `204 No Content`; when a JSON body is
/// present only the order id is of interest and even that is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub id: Option<i64>,
}
