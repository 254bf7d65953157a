//! Application stores.
//!
//! Each page component reads from and dispatches into one of these stores;
//! the stores call the [`crate::api::ShopClient`] asynchronously and reduce
//! responses into state. Mutations happen on discrete turns (a
//! single-threaded, event-driven model); observers re-render by awaiting
//! each store's [`ChangeNotifier`] channel.
//!
//! There are no hidden globals: whatever composes the views owns an
//! [`AppState`] and passes it down explicitly.

pub mod cart;
pub mod catalog;
mod notify;
pub mod product;
pub mod top_sales;
pub mod ui;

pub use cart::{CartStore, CheckoutErrors, CheckoutForm, SubmitStatus};
pub use catalog::{CatalogStore, PAGE_SIZE, PageRequest};
pub use notify::ChangeNotifier;
pub use product::{DetailRequest, MAX_QUANTITY, MIN_QUANTITY, ProductStore};
pub use top_sales::TopSalesStore;
pub use ui::UiStore;

use crate::api::ShopClient;
use crate::storage::CartStorage;

/// The explicit application-state container.
///
/// Owns the API client and the five stores. Each store exclusively owns its
/// slice; the only cross-store flow is the one-way Product -> Cart hand-off
/// in [`AppState::add_selection_to_cart`].
pub struct AppState {
    pub client: ShopClient,
    pub cart: CartStore,
    pub catalog: CatalogStore,
    pub product: ProductStore,
    pub top_sales: TopSalesStore,
    pub ui: UiStore,
}

impl AppState {
    /// Assemble the state container from its injected capabilities.
    #[must_use]
    pub fn new(client: ShopClient, cart_storage: Box<dyn CartStorage>) -> Self {
        Self {
            client,
            cart: CartStore::new(cart_storage),
            catalog: CatalogStore::new(),
            product: ProductStore::new(),
            top_sales: TopSalesStore::new(),
            ui: UiStore::new(),
        }
    }

    /// Hand the product view's current selection to the cart.
    ///
    /// Returns `false` (and does nothing) when no size is selected - the
    /// view keeps the button disabled in that case. After a successful add
    /// the caller navigates to the cart view.
    pub fn add_selection_to_cart(&mut self) -> bool {
        match self.product.cart_line() {
            Some(line) => {
                self.cart.add(line);
                true
            }
            None => false,
        }
    }
}
