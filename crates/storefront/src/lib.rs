//! Bosa Noga Storefront - headless client layer for the shoe shop.
//!
//! This crate is the state and data layer of the storefront: a typed REST
//! client for the shop API plus the stores that page components read from
//! and dispatch into. Routing and presentation are deliberately absent;
//! whatever composes the views owns an [`store::AppState`] and re-renders
//! when a store signals a change.
//!
//! # Modules
//!
//! - [`api`] - typed `reqwest` client for the shop's REST endpoints
//! - [`config`] - environment configuration
//! - [`storage`] - injected persistence port for the cart
//! - [`store`] - cart, catalog, product, top-sales, and UI chrome stores

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod storage;
pub mod store;
