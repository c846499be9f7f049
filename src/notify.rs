//! In-process change notifications.
//!
//! Delivery is synchronous and in emit order. A listener that panics is
//! logged and skipped; the remaining listeners still receive the event.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Token returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Registry of listeners for one kind of event payload.
pub struct Listeners<T> {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(Subscription, Listener<T>)>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Register a listener. Listeners run in subscription order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let subscription = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        listeners.push((subscription, Arc::new(listener)));
        subscription
    }

    /// Remove a listener. Returns true if it was registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = listeners.len();
        listeners.retain(|(s, _)| *s != subscription);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to every listener registered at the time of the call.
    ///
    /// The list is copied before delivery so a listener may subscribe or
    /// unsubscribe without deadlocking.
    pub fn emit(&self, event: &T) {
        let snapshot: Vec<(Subscription, Listener<T>)> = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        for (subscription, listener) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                tracing::warn!(
                    subscription = subscription.id(),
                    "cart listener panicked; continuing with remaining listeners"
                );
            }
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}
