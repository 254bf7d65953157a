//! Catalog store: paginated, filterable, searchable item listing.
//!
//! Category selection and free-text search compose as independent filters
//! that are always sent together on every request. Changing either one
//! resets the committed items and restarts paging from offset 0; a page
//! shorter than [`PAGE_SIZE`] (including empty) is the sole signal that the
//! listing is exhausted.
//!
//! Requests are issued through [`CatalogStore::select_category`] /
//! [`CatalogStore::set_search_query`] / [`CatalogStore::reload`] /
//! [`CatalogStore::next_page`], each of which returns a [`PageRequest`]
//! token, and completed through [`CatalogStore::apply_page`]. Each request
//! carries a monotonically increasing token; a response whose token is no
//! longer the most recently issued one is discarded, so a slow in-flight
//! page can never clobber the state of a newer query ("last requested
//! query wins").

use tokio::sync::watch;
use tracing::warn;

use bosanoga_core::{CatalogItem, Category, CategoryId};

use crate::api::{ApiError, ItemsQuery, ShopClient};
use crate::store::notify::ChangeNotifier;

/// Fixed page size of the item listing.
pub const PAGE_SIZE: usize = 6;

/// A ticket for one in-flight page fetch.
///
/// Created by the store when a fetch is issued; hand it back to
/// [`CatalogStore::apply_page`] together with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    token: u64,
    append: bool,
    /// The exact query to send to [`ShopClient::items`].
    pub query: ItemsQuery,
}

impl PageRequest {
    /// Whether this fetch extends the committed items rather than
    /// replacing them.
    #[must_use]
    pub const fn is_append(&self) -> bool {
        self.append
    }
}

/// The catalog view state.
pub struct CatalogStore {
    categories: Vec<Category>,
    categories_loading: bool,
    items: Vec<CatalogItem>,
    loading: bool,
    loading_more: bool,
    error: Option<String>,
    selected_category: Option<CategoryId>,
    search_query: String,
    has_more: bool,
    last_issued: u64,
    notifier: ChangeNotifier,
}

impl CatalogStore {
    /// Create an empty catalog store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            categories_loading: false,
            items: Vec::new(),
            loading: false,
            loading_more: false,
            error: None,
            selected_category: None,
            search_query: String::new(),
            has_more: true,
            last_issued: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The committed items, in listing order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// The category reference list (empty until loaded).
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Whether the initial page is being fetched.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a "load more" page is being fetched.
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Whether the category list is being fetched.
    #[must_use]
    pub const fn is_loading_categories(&self) -> bool {
        self.categories_loading
    }

    /// Display-ready error from the last failed page fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Currently selected category filter; `None` means "all".
    #[must_use]
    pub const fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    /// Active search query (empty string when none).
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Whether another page may exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Paging offset: always the committed item count, so a filter change
    /// (which clears the items) structurally resets it to zero.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.items.len()
    }

    /// Subscribe to change signals for re-rendering.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Select a category filter (`None` = all) and restart paging.
    pub fn select_category(&mut self, category: Option<CategoryId>) -> PageRequest {
        self.selected_category = category;
        self.reset_paging();
        self.issue(false)
    }

    /// Replace the search query and restart paging.
    pub fn set_search_query(&mut self, query: impl Into<String>) -> PageRequest {
        self.search_query = query.into();
        self.reset_paging();
        self.issue(false)
    }

    /// Restart paging with the current filters (initial load).
    pub fn reload(&mut self) -> PageRequest {
        self.reset_paging();
        self.issue(false)
    }

    /// Issue a "load more" fetch at the current item count.
    ///
    /// Returns `None` when the listing is exhausted or a page is already in
    /// flight, so rapid repeated triggers collapse into one request.
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if !self.has_more || self.loading || self.loading_more {
            return None;
        }
        Some(self.issue(true))
    }

    /// Commit the outcome of a page fetch.
    ///
    /// Stale responses - ones whose request is no longer the most recently
    /// issued - are discarded without touching any state.
    pub fn apply_page(&mut self, request: &PageRequest, result: Result<Vec<CatalogItem>, ApiError>) {
        if request.token != self.last_issued {
            return;
        }

        if request.append {
            self.loading_more = false;
        } else {
            self.loading = false;
        }

        match result {
            Ok(page) => {
                self.has_more = page.len() == PAGE_SIZE;
                if request.append {
                    self.items.extend(page);
                } else {
                    self.items = page;
                }
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        self.notifier.notify();
    }

    fn reset_paging(&mut self) {
        self.items.clear();
        self.has_more = true;
    }

    fn issue(&mut self, append: bool) -> PageRequest {
        self.last_issued += 1;
        if append {
            self.loading_more = true;
        } else {
            // A fresh query supersedes any in-flight append; its response
            // is now stale, so its flag must not outlive it.
            self.loading = true;
            self.loading_more = false;
            self.error = None;
        }
        self.notifier.notify();

        PageRequest {
            token: self.last_issued,
            append,
            query: ItemsQuery {
                category: self.selected_category,
                offset: if append { self.items.len() } else { 0 },
                search: if self.search_query.is_empty() {
                    None
                } else {
                    Some(self.search_query.clone())
                },
            },
        }
    }

    // =========================================================================
    // Async drivers
    // =========================================================================

    /// Perform an issued page fetch against the client and commit it.
    pub async fn load_page(&mut self, client: &ShopClient, request: PageRequest) {
        let result = client.items(&request.query).await;
        self.apply_page(&request, result);
    }

    /// Fetch the category reference list, once per catalog session.
    ///
    /// A failure is logged and leaves the list empty; the listing itself
    /// still works without the filter bar.
    pub async fn load_categories(&mut self, client: &ShopClient) {
        if !self.categories.is_empty() || self.categories_loading {
            return;
        }
        self.categories_loading = true;
        self.notifier.notify();

        match client.categories().await {
            Ok(categories) => self.categories = categories,
            Err(err) => warn!(error = %err, "failed to load categories"),
        }

        self.categories_loading = false;
        self.notifier.notify();
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bosanoga_core::{Price, ProductId};

    fn item(id: i32) -> CatalogItem {
        CatalogItem {
            id: ProductId::new(id),
            title: format!("Товар {id}"),
            price: Price::new(1000),
            images: vec![],
        }
    }

    fn page(start: i32, len: usize) -> Vec<CatalogItem> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        (0..len as i32).map(|i| item(start + i)).collect()
    }

    #[test]
    fn full_page_keeps_has_more_true() {
        let mut catalog = CatalogStore::new();
        let request = catalog.reload();
        catalog.apply_page(&request, Ok(page(1, PAGE_SIZE)));

        assert_eq!(catalog.items().len(), PAGE_SIZE);
        assert!(catalog.has_more());
        assert!(!catalog.is_loading());
    }

    #[test]
    fn short_page_terminates_pagination() {
        let mut catalog = CatalogStore::new();
        let request = catalog.reload();
        catalog.apply_page(&request, Ok(page(1, 2)));

        assert!(!catalog.has_more());
        assert!(catalog.next_page().is_none());
    }

    #[test]
    fn empty_page_terminates_pagination() {
        let mut catalog = CatalogStore::new();
        let request = catalog.reload();
        catalog.apply_page(&request, Ok(vec![]));

        assert!(catalog.items().is_empty());
        assert!(!catalog.has_more());
    }

    #[test]
    fn load_more_appends_at_committed_count() {
        let mut catalog = CatalogStore::new();
        let first = catalog.reload();
        catalog.apply_page(&first, Ok(page(1, PAGE_SIZE)));

        let more = catalog.next_page().unwrap();
        assert!(more.is_append());
        assert_eq!(more.query.offset, PAGE_SIZE);

        catalog.apply_page(&more, Ok(page(7, 3)));
        assert_eq!(catalog.items().len(), PAGE_SIZE + 3);
        assert!(!catalog.has_more());
    }

    #[test]
    fn filter_change_clears_committed_items_before_the_new_page() {
        let mut catalog = CatalogStore::new();
        let first = catalog.reload();
        catalog.apply_page(&first, Ok(page(1, PAGE_SIZE)));

        let request = catalog.select_category(Some(CategoryId::new(3)));
        // No stale items appear even transiently in the committed state.
        assert!(catalog.items().is_empty());
        assert_eq!(catalog.offset(), 0);
        assert!(catalog.has_more());
        assert_eq!(request.query.offset, 0);
        assert_eq!(request.query.category, Some(CategoryId::new(3)));
    }

    #[test]
    fn search_change_resets_paging_too() {
        let mut catalog = CatalogStore::new();
        let first = catalog.reload();
        catalog.apply_page(&first, Ok(page(1, PAGE_SIZE)));

        let request = catalog.set_search_query("кеды");
        assert!(catalog.items().is_empty());
        assert_eq!(request.query.search.as_deref(), Some("кеды"));
        assert_eq!(request.query.offset, 0);
    }

    #[test]
    fn both_filters_travel_together_on_every_request() {
        let mut catalog = CatalogStore::new();
        catalog.select_category(Some(CategoryId::new(2)));
        let request = catalog.set_search_query("сапоги");
        assert_eq!(request.query.category, Some(CategoryId::new(2)));
        assert_eq!(request.query.search.as_deref(), Some("сапоги"));

        catalog.apply_page(&request, Ok(page(1, PAGE_SIZE)));
        let more = catalog.next_page().unwrap();
        assert_eq!(more.query.category, Some(CategoryId::new(2)));
        assert_eq!(more.query.search.as_deref(), Some("сапоги"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut catalog = CatalogStore::new();
        let slow = catalog.select_category(Some(CategoryId::new(1)));
        let fresh = catalog.select_category(Some(CategoryId::new(2)));

        // The slow response for the older query arrives after the newer
        // request was issued: it must not clobber anything.
        catalog.apply_page(&slow, Ok(page(100, PAGE_SIZE)));
        assert!(catalog.items().is_empty());
        assert!(catalog.is_loading());

        catalog.apply_page(&fresh, Ok(page(1, 4)));
        assert_eq!(catalog.items().len(), 4);
        assert!(!catalog.is_loading());
    }

    #[test]
    fn filter_change_during_load_more_keeps_pagination_alive() {
        let mut catalog = CatalogStore::new();
        let first = catalog.reload();
        catalog.apply_page(&first, Ok(page(1, PAGE_SIZE)));

        // A "load more" page is in flight when the user switches category.
        let stale_more = catalog.next_page().unwrap();
        let fresh = catalog.select_category(Some(CategoryId::new(3)));
        assert!(!catalog.is_loading_more());

        // The old append resolves late: its data is discarded and it must
        // not leave the store thinking an append is still in flight.
        catalog.apply_page(&stale_more, Ok(page(7, PAGE_SIZE)));
        assert!(catalog.items().is_empty());
        assert!(!catalog.is_loading_more());
        assert!(catalog.is_loading());

        catalog.apply_page(&fresh, Ok(page(20, PAGE_SIZE)));
        assert_eq!(catalog.items().len(), PAGE_SIZE);
        assert!(catalog.next_page().is_some());
    }

    #[test]
    fn rapid_load_more_triggers_collapse() {
        let mut catalog = CatalogStore::new();
        let first = catalog.reload();
        catalog.apply_page(&first, Ok(page(1, PAGE_SIZE)));

        let more = catalog.next_page();
        assert!(more.is_some());
        // Second trigger while the first page is still in flight.
        assert!(catalog.next_page().is_none());
    }

    #[test]
    fn failed_page_stores_a_display_ready_error() {
        let mut catalog = CatalogStore::new();
        let request = catalog.reload();
        catalog.apply_page(
            &request,
            Err(ApiError::Status {
                context: "loading catalog items",
                status: 500,
            }),
        );

        assert_eq!(
            catalog.error(),
            Some("loading catalog items failed: HTTP 500")
        );
        assert!(!catalog.is_loading());

        // The next attempt clears the error.
        catalog.reload();
        assert_eq!(catalog.error(), None);
    }
}
