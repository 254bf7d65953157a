//! Product store: one product card plus transient selection state.
//!
//! Navigating to a product id clears the previous detail before the new
//! fetch resolves, so stale data is never shown under a new id while
//! loading. The selection (size, quantity) is transient and resets when the
//! detail changes or the view is left.

use tokio::sync::watch;

use bosanoga_core::{CartLine, ProductDetail, ProductId};

use crate::api::{ApiError, ShopClient};
use crate::store::notify::ChangeNotifier;

/// Lower quantity bound; decrementing at the bound is a no-op.
pub const MIN_QUANTITY: u32 = 1;
/// Upper quantity bound; incrementing at the bound is a no-op.
pub const MAX_QUANTITY: u32 = 10;

/// Shown for cart lines whose product has no images.
const PLACEHOLDER_IMAGE: &str = "/img/products/placeholder.jpg";

/// A ticket for one in-flight detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    token: u64,
    /// The product to fetch via [`ShopClient::item`].
    pub id: ProductId,
}

/// State of the product view.
pub struct ProductStore {
    product: Option<ProductDetail>,
    loading: bool,
    error: Option<String>,
    selected_size: Option<String>,
    quantity: u32,
    last_issued: u64,
    notifier: ChangeNotifier,
}

impl ProductStore {
    /// Create an empty product store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            product: None,
            loading: false,
            error: None,
            selected_size: None,
            quantity: MIN_QUANTITY,
            last_issued: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The loaded product card, if any.
    #[must_use]
    pub const fn product(&self) -> Option<&ProductDetail> {
        self.product.as_ref()
    }

    /// Whether a detail fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Display-ready error from the last failed fetch ("item N not found"
    /// for a 404).
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The size the user picked, if any.
    #[must_use]
    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    /// The quantity selector value, always within `1..=10`.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether "add to cart" is enabled: a detail is loaded and a size is
    /// selected.
    #[must_use]
    pub const fn can_add_to_cart(&self) -> bool {
        self.product.is_some() && self.selected_size.is_some()
    }

    /// Subscribe to change signals for re-rendering.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Start loading a product, clearing the previous detail and selection.
    pub fn begin_load(&mut self, id: ProductId) -> DetailRequest {
        self.product = None;
        self.selected_size = None;
        self.quantity = MIN_QUANTITY;
        self.error = None;
        self.loading = true;
        self.last_issued += 1;
        self.notifier.notify();
        DetailRequest {
            token: self.last_issued,
            id,
        }
    }

    /// Commit the outcome of a detail fetch; stale responses are discarded.
    pub fn apply(&mut self, request: &DetailRequest, result: Result<ProductDetail, ApiError>) {
        if request.token != self.last_issued {
            return;
        }
        self.loading = false;
        match result {
            Ok(detail) => {
                self.product = Some(detail);
                self.selected_size = None;
                self.quantity = MIN_QUANTITY;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        self.notifier.notify();
    }

    /// Pick a size from the card.
    pub fn select_size(&mut self, size: impl Into<String>) {
        self.selected_size = Some(size.into());
        self.notifier.notify();
    }

    /// Set the quantity directly; values outside `1..=10` are ignored.
    pub fn set_quantity(&mut self, quantity: u32) {
        if (MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
            self.quantity = quantity;
            self.notifier.notify();
        }
    }

    /// Increase the quantity, saturating at the upper bound.
    pub fn increment_quantity(&mut self) {
        if self.quantity < MAX_QUANTITY {
            self.quantity += 1;
            self.notifier.notify();
        }
    }

    /// Decrease the quantity, saturating at the lower bound.
    pub fn decrement_quantity(&mut self) {
        if self.quantity > MIN_QUANTITY {
            self.quantity -= 1;
            self.notifier.notify();
        }
    }

    /// Reset everything on leaving the product view.
    pub fn reset(&mut self) {
        self.product = None;
        self.selected_size = None;
        self.quantity = MIN_QUANTITY;
        self.error = None;
        self.loading = false;
        self.notifier.notify();
    }

    /// Build the cart line for the current selection.
    ///
    /// `None` unless a detail is loaded and a size is selected - the view
    /// keeps "add to cart" disabled in that case.
    #[must_use]
    pub fn cart_line(&self) -> Option<CartLine> {
        let product = self.product.as_ref()?;
        let size = self.selected_size.clone()?;
        Some(CartLine {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product
                .first_image()
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_string(),
            size,
            count: self.quantity,
        })
    }

    // =========================================================================
    // Async driver
    // =========================================================================

    /// Load a product card end to end.
    pub async fn load(&mut self, client: &ShopClient, id: ProductId) {
        let request = self.begin_load(id);
        let result = client.item(request.id).await;
        self.apply(&request, result);
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bosanoga_core::{CategoryId, Price, SizeOption};

    fn detail(id: i32, images: Vec<String>) -> ProductDetail {
        ProductDetail {
            id: ProductId::new(id),
            category: CategoryId::new(1),
            title: "Ботинки женские".to_string(),
            price: Price::new(3400),
            images,
            sku: Some("B672".to_string()),
            manufacturer: None,
            color: None,
            material: None,
            reason: None,
            season: None,
            sizes: vec![
                SizeOption {
                    size: "37 US".to_string(),
                    available: true,
                },
                SizeOption {
                    size: "38 US".to_string(),
                    available: false,
                },
            ],
        }
    }

    fn loaded_store() -> ProductStore {
        let mut store = ProductStore::new();
        let request = store.begin_load(ProductId::new(5));
        store.apply(&request, Ok(detail(5, vec!["/img/5.jpg".to_string()])));
        store
    }

    #[test]
    fn begin_load_clears_previous_detail_and_selection() {
        let mut store = loaded_store();
        store.select_size("37 US");
        store.set_quantity(4);

        store.begin_load(ProductId::new(6));
        assert!(store.product().is_none());
        assert!(store.selected_size().is_none());
        assert_eq!(store.quantity(), MIN_QUANTITY);
        assert!(store.is_loading());
    }

    #[test]
    fn quantity_saturates_at_both_bounds() {
        let mut store = loaded_store();

        store.decrement_quantity();
        assert_eq!(store.quantity(), 1);

        store.set_quantity(10);
        store.increment_quantity();
        assert_eq!(store.quantity(), 10);
    }

    #[test]
    fn set_quantity_ignores_out_of_range_values() {
        let mut store = loaded_store();
        store.set_quantity(0);
        assert_eq!(store.quantity(), 1);
        store.set_quantity(11);
        assert_eq!(store.quantity(), 1);
        store.set_quantity(7);
        assert_eq!(store.quantity(), 7);
    }

    #[test]
    fn cart_line_requires_a_selected_size() {
        let mut store = loaded_store();
        assert!(!store.can_add_to_cart());
        assert!(store.cart_line().is_none());

        store.select_size("37 US");
        store.set_quantity(2);
        let line = store.cart_line().unwrap();
        assert_eq!(line.id, ProductId::new(5));
        assert_eq!(line.size, "37 US");
        assert_eq!(line.count, 2);
        assert_eq!(line.image, "/img/5.jpg");
    }

    #[test]
    fn cart_line_falls_back_to_placeholder_image() {
        let mut store = ProductStore::new();
        let request = store.begin_load(ProductId::new(5));
        store.apply(&request, Ok(detail(5, vec![])));
        store.select_size("37 US");

        let line = store.cart_line().unwrap();
        assert_eq!(line.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn stale_detail_response_is_discarded() {
        let mut store = ProductStore::new();
        let slow = store.begin_load(ProductId::new(1));
        let fresh = store.begin_load(ProductId::new(2));

        store.apply(&slow, Ok(detail(1, vec![])));
        assert!(store.product().is_none());
        assert!(store.is_loading());

        store.apply(&fresh, Ok(detail(2, vec![])));
        assert_eq!(store.product().unwrap().id, ProductId::new(2));
    }

    #[test]
    fn not_found_surfaces_the_specific_message() {
        let mut store = ProductStore::new();
        let request = store.begin_load(ProductId::new(17));
        store.apply(&request, Err(ApiError::NotFound(ProductId::new(17))));

        assert_eq!(store.error(), Some("item 17 not found"));
        assert!(!store.is_loading());
    }

    #[test]
    fn reset_returns_to_the_initial_state() {
        let mut store = loaded_store();
        store.select_size("37 US");
        store.reset();

        assert!(store.product().is_none());
        assert!(store.selected_size().is_none());
        assert_eq!(store.quantity(), MIN_QUANTITY);
        assert!(store.error().is_none());
    }
}
