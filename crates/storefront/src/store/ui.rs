//! UI chrome store: ephemeral view state with no business rules.
//!
//! Nothing here is persisted. The header search box holds an uncommitted
//! draft; committing it via [`UiStore::submit_search`] hands the query to
//! the caller, which forwards it to the catalog store and encodes it into
//! the navigable address (the shareable representation of an active
//! search). Category selection deliberately never reaches the address bar.

use tokio::sync::watch;

use crate::store::notify::ChangeNotifier;

/// Ephemeral header/navigation state.
pub struct UiStore {
    search_open: bool,
    menu_open: bool,
    header_search: String,
    notifier: ChangeNotifier,
}

impl UiStore {
    /// Create the store with everything closed and empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_open: false,
            menu_open: false,
            header_search: String::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Whether the header search box is expanded.
    #[must_use]
    pub const fn is_search_open(&self) -> bool {
        self.search_open
    }

    /// Whether the mobile navigation is expanded.
    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// The uncommitted search draft.
    #[must_use]
    pub fn header_search(&self) -> &str {
        &self.header_search
    }

    /// Subscribe to change signals for re-rendering.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    /// Toggle the search box open or closed.
    pub fn toggle_search(&mut self) {
        self.search_open = !self.search_open;
        self.notifier.notify();
    }

    /// Close the search box.
    pub fn close_search(&mut self) {
        if self.search_open {
            self.search_open = false;
            self.notifier.notify();
        }
    }

    /// Replace the search draft as the user types.
    pub fn set_header_search(&mut self, text: impl Into<String>) {
        self.header_search = text.into();
        self.notifier.notify();
    }

    /// Discard the search draft.
    pub fn clear_header_search(&mut self) {
        self.header_search.clear();
        self.notifier.notify();
    }

    /// Toggle the mobile navigation.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.notifier.notify();
    }

    /// Close the mobile navigation.
    pub fn close_menu(&mut self) {
        if self.menu_open {
            self.menu_open = false;
            self.notifier.notify();
        }
    }

    /// Commit the search draft.
    ///
    /// With an empty draft this just closes the box and returns `None`.
    /// With a non-empty draft it closes the box, clears the draft, and
    /// returns the query for the caller to apply to the catalog store and
    /// navigation.
    pub fn submit_search(&mut self) -> Option<String> {
        let query = self.header_search.trim().to_string();
        self.search_open = false;
        if query.is_empty() {
            self.notifier.notify();
            return None;
        }
        self.header_search.clear();
        self.notifier.notify();
        Some(query)
    }

    /// The search box lost focus: close it when the draft is empty.
    pub fn blur_search(&mut self) {
        if self.header_search.trim().is_empty() {
            self.header_search.clear();
            self.close_search();
        }
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}
