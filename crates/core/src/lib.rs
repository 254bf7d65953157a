//! Bosa Noga Core - Shared types library.
//!
//! This crate provides the domain types used across the Bosa Noga
//! components:
//! - `storefront` - headless client layer (API client + stores)
//! - `cli` - command-line shell over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, phone numbers, and the catalog, cart
//!   and order entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
