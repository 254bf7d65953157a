//! Top-sales store: the home page's hit list.

use tokio::sync::watch;

use bosanoga_core::CatalogItem;

use crate::api::ShopClient;
use crate::store::notify::ChangeNotifier;

/// State of the top-sales strip.
pub struct TopSalesStore {
    items: Vec<CatalogItem>,
    loading: bool,
    error: Option<String>,
    notifier: ChangeNotifier,
}

impl TopSalesStore {
    /// Create an empty top-sales store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            notifier: ChangeNotifier::new(),
        }
    }

    /// The fetched items.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Whether the fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Display-ready error from the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Subscribe to change signals for re-rendering.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    /// Fetch the top-sales list.
    pub async fn load(&mut self, client: &ShopClient) {
        self.loading = true;
        self.error = None;
        self.notifier.notify();

        match client.top_sales().await {
            Ok(items) => self.items = items,
            Err(err) => self.error = Some(err.to_string()),
        }

        self.loading = false;
        self.notifier.notify();
    }
}

impl Default for TopSalesStore {
    fn default() -> Self {
        Self::new()
    }
}
