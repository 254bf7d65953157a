//! Cart store: lines, persistence, and order submission.
//!
//! The cart is the only persisted slice of state. Every mutating operation
//! synchronously writes the full line collection through the injected
//! [`CartStorage`] port; on construction the collection is seeded back from
//! it, and a payload that fails to parse is treated as an empty cart rather
//! than an error.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{error, warn};

use bosanoga_core::{CartLine, OrderOwner, OrderRequest, Phone, Price, ProductId};

use crate::api::ShopClient;
use crate::storage::CartStorage;
use crate::store::notify::ChangeNotifier;

/// Submission state machine: Idle -> Submitting -> Succeeded | Failed.
///
/// `Succeeded` is meant to be displayed for
/// [`CartStore::SUCCESS_DISPLAY_WINDOW`] and then reset to `Idle`;
/// `Failed` resets on the next submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// Holds the API client's message verbatim.
    Failed(String),
}

/// Raw checkout form input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub phone: String,
    pub address: String,
    /// Explicit terms-agreement checkbox.
    pub agreement: bool,
}

/// Per-field validation errors computed client-side before any network call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutErrors {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub agreement: Option<String>,
}

impl CheckoutErrors {
    /// True when no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.address.is_none() && self.agreement.is_none()
    }
}

impl CheckoutForm {
    /// Validate the form into an [`OrderOwner`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutErrors`] keyed per field; submission is blocked
    /// until all of them are resolved.
    pub fn validate(&self) -> Result<OrderOwner, CheckoutErrors> {
        let mut errors = CheckoutErrors::default();

        let phone = match Phone::parse(&self.phone) {
            Ok(phone) => Some(phone),
            Err(e) => {
                errors.phone = Some(e.to_string());
                None
            }
        };

        let address = self.address.trim();
        if address.is_empty() {
            errors.address = Some("delivery address is required".to_string());
        }

        if !self.agreement {
            errors.agreement = Some("the terms must be accepted".to_string());
        }

        match phone {
            Some(phone) if errors.is_empty() => Ok(OrderOwner {
                phone,
                address: address.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// The shopping cart: owned lines plus submission status.
pub struct CartStore {
    lines: Vec<CartLine>,
    status: SubmitStatus,
    /// When a `Succeeded` status stops being displayed.
    success_deadline: Option<Instant>,
    storage: Box<dyn CartStorage>,
    notifier: ChangeNotifier,
}

impl CartStore {
    /// How long a successful submission stays on screen before the status
    /// resets to idle.
    pub const SUCCESS_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

    /// Create the store, seeding lines from the storage port.
    ///
    /// Absent or corrupted storage never fails construction; it yields an
    /// empty cart.
    #[must_use]
    pub fn new(storage: Box<dyn CartStorage>) -> Self {
        let lines = load_lines(storage.as_ref());
        Self {
            lines,
            status: SubmitStatus::Idle,
            success_deadline: None,
            storage,
            notifier: ChangeNotifier::new(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines, used for the header badge.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total price over all lines; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Current submission status.
    #[must_use]
    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    /// Subscribe to change signals for re-rendering.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a line, merging additively into an existing `(id, size)` line.
    pub fn add(&mut self, line: CartLine) {
        // Invariant: count >= 1 on every stored line.
        let count = line.count.max(1);
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == line.key()) {
            existing.count += count;
        } else {
            self.lines.push(CartLine { count, ..line });
        }
        self.persist();
        self.notifier.notify();
    }

    /// Remove the line matching `(id, size)`; no-op if absent.
    pub fn remove(&mut self, id: ProductId, size: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(id, size));
        if self.lines.len() != before {
            self.persist();
            self.notifier.notify();
        }
    }

    /// Overwrite the count of the line matching `(id, size)`.
    ///
    /// A count of zero removes the line instead of storing it; an absent
    /// line is a no-op.
    pub fn set_count(&mut self, id: ProductId, size: &str, count: u32) {
        if !self.lines.iter().any(|line| line.matches(id, size)) {
            return;
        }
        if count == 0 {
            self.lines.retain(|line| !line.matches(id, size));
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.matches(id, size)) {
            line.count = count;
        }
        self.persist();
        self.notifier.notify();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
        self.notifier.notify();
    }

    /// Return the submission status to idle.
    pub fn reset_status(&mut self) {
        self.success_deadline = None;
        if self.status != SubmitStatus::Idle {
            self.status = SubmitStatus::Idle;
            self.notifier.notify();
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validate the form and submit the cart as an order.
    ///
    /// On API success the cart is cleared (storage included) and the status
    /// becomes [`SubmitStatus::Succeeded`]; on API failure the lines are
    /// left untouched and the status carries the client's error message
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutErrors`] when the form fails client-side
    /// validation; in that case nothing is sent and the status is unchanged.
    pub async fn submit_order(
        &mut self,
        client: &ShopClient,
        form: &CheckoutForm,
    ) -> Result<(), CheckoutErrors> {
        let owner = form.validate()?;

        // A new attempt clears a previous failure.
        self.status = SubmitStatus::Submitting;
        self.notifier.notify();

        let order = OrderRequest::from_lines(owner, &self.lines);
        match client.submit_order(&order).await {
            Ok(_) => {
                self.lines.clear();
                self.persist();
                self.status = SubmitStatus::Succeeded;
                self.success_deadline = Some(Instant::now() + Self::SUCCESS_DISPLAY_WINDOW);
            }
            Err(err) => {
                self.status = SubmitStatus::Failed(err.to_string());
            }
        }
        self.notifier.notify();
        Ok(())
    }

    /// Reset a successful status once its display window has elapsed.
    ///
    /// The window is data, not a held lock: the store stays fully usable
    /// while the banner is up. Call this from the render loop (or after a
    /// timer); it is a no-op before the deadline and in any other status.
    pub fn expire_success(&mut self) {
        if self.status == SubmitStatus::Succeeded
            && self
                .success_deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.reset_status();
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.lines) {
            Ok(payload) => {
                if let Err(err) = self.storage.set(&payload) {
                    error!(error = %err, "failed to persist cart");
                }
            }
            Err(err) => error!(error = %err, "failed to encode cart for persistence"),
        }
    }
}

fn load_lines(storage: &dyn CartStorage) -> Vec<CartLine> {
    match storage.get() {
        Ok(Some(payload)) => serde_json::from_str(&payload).unwrap_or_else(|err| {
            warn!(error = %err, "discarding unparseable persisted cart");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(error = %err, "cart storage unreadable, starting empty");
            Vec::new()
        }
    }
}
