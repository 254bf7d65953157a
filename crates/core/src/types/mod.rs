//! Core types for the Bosa Noga storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod order;
pub mod phone;
pub mod price;

pub use cart::CartLine;
pub use catalog::{CatalogItem, Category, ProductDetail, SizeOption};
pub use id::*;
pub use order::{OrderItem, OrderOwner, OrderRequest, OrderResponse};
pub use phone::{Phone, PhoneError};
pub use price::Price;
