//! Change notification for reactive observers.

use tokio::sync::watch;

/// A lightweight publish/subscribe wrapper carried by every store.
///
/// Observers subscribe once and await [`watch::Receiver::changed`]; the
/// store bumps a generation counter on every mutation. Receivers that lag
/// simply see the latest generation - intermediate states are not queued,
/// which is exactly the re-render semantics a view layer wants.
#[derive(Debug)]
pub struct ChangeNotifier {
    tx: watch::Sender<u64>,
}

impl ChangeNotifier {
    /// Create a notifier at generation zero.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Signal that the owning store's state changed.
    pub(crate) fn notify(&self) {
        self.tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    /// Subscribe to change signals.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_mutations() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        // Coalescing: two rapid notifications wake the receiver once with
        // the latest generation.
        notifier.notify();
        notifier.notify();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 3);
    }
}
