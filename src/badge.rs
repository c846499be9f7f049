//! Cart badge synchronization.
//!
//! A badge is any UI element that shows the cart's unit count. Badges are
//! hidden while the cart is empty.

use std::sync::{Arc, Mutex};

use crate::cart::{CartLineItem, CartStore};
use crate::notify::Subscription;
use crate::storage::KeyValueStore;

/// A UI element that displays the cart count.
pub trait Badge: Send {
    fn set_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
}

/// Every badge tagged to show the cart count.
#[derive(Default)]
pub struct BadgeSet {
    badges: Mutex<Vec<Box<dyn Badge>>>,
}

impl BadgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, badge: impl Badge + 'static) {
        self.lock().push(Box::new(badge));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write `count` to every badge; hide them all when it is zero.
    pub fn sync(&self, count: u32) {
        let text = count.to_string();
        for badge in self.lock().iter_mut() {
            badge.set_text(&text);
            badge.set_visible(count > 0);
        }
    }

    /// Keep the badges in step with `store` by re-syncing on every change.
    pub fn bind<S: KeyValueStore>(self: &Arc<Self>, store: &CartStore<S>) -> Subscription {
        let badges = Arc::clone(self);
        store.subscribe(move |cart: &Vec<CartLineItem>| {
            let count = cart
                .iter()
                .fold(0u32, |sum, item| sum.saturating_add(item.quantity));
            badges.sync(count);
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Box<dyn Badge>>> {
        self.badges
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeState {
    pub text: String,
    pub visible: bool,
}

/// Headless badge whose clones share state, so the caller can keep a handle
/// after handing one to a [`BadgeSet`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryBadge {
    state: Arc<Mutex<BadgeState>>,
}

impl InMemoryBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BadgeState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Badge for InMemoryBadge {
    fn set_text(&mut self, text: &str) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.text = text.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.visible = visible;
    }
}
