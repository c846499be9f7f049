//! CartStore - the single source of truth for the shopping cart.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::{CartLineItem, MenuItemCandidate, DEFAULT_CART_KEY};
use crate::badge::BadgeSet;
use crate::error::CartError;
use crate::notify::{Listeners, Subscription};
use crate::storage::KeyValueStore;

/// Cart store over an injected key-value backend.
///
/// Nothing is cached: every operation reads the backend, and every mutation
/// writes the full cart back under one key before notifying listeners. Two
/// stores on the same backend therefore see each other's writes, and the last
/// full overwrite wins.
pub struct CartStore<S> {
    storage: S,
    key: String,
    listeners: Listeners<Vec<CartLineItem>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store under the default `mady_cart` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            listeners: Listeners::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current cart in insertion order.
    ///
    /// A missing key, a failing backend read, or a value that does not decode
    /// as a cart all yield an empty cart. Malformed data is logged, never
    /// returned as an error.
    pub fn read(&self) -> Vec<CartLineItem> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "cart storage read failed; using empty cart");
                return Vec::new();
            }
        };

        // `null` decodes to None, the same as an absent key.
        match serde_json::from_str::<Option<Vec<CartLineItem>>>(&raw) {
            Ok(items) => self.normalize(items.unwrap_or_default()),
            Err(err) => {
                warn!(key = %self.key, error = %err, "persisted cart is malformed; using empty cart");
                Vec::new()
            }
        }
    }

    /// Add one unit of `candidate`. An existing line keeps its first-seen
    /// name, price and image and only gains quantity.
    pub fn add_item(&self, candidate: &MenuItemCandidate) -> Result<(), CartError> {
        if !candidate.price.is_finite() || candidate.price < 0.0 {
            return Err(CartError::InvalidPrice {
                id: candidate.id,
                price: candidate.price,
            });
        }

        let mut items = self.read();
        match items.iter_mut().find(|item| item.id == candidate.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => items.push(candidate.to_line_item()),
        }

        debug!(id = candidate.id, "cart item added");
        self.save(items)
    }

    /// Remove the line for `id`. An absent id still rewrites and notifies.
    pub fn remove_item(&self, id: i64) -> Result<(), CartError> {
        let mut items = self.read();
        items.retain(|item| item.id != id);

        debug!(id, "cart item removed");
        self.save(items)
    }

    /// Set the quantity for `id` to exactly `qty`. Non-positive quantities
    /// remove the line. Unknown ids are ignored without writing.
    pub fn update_qty(&self, id: i64, qty: i64) -> Result<(), CartError> {
        let mut items = self.read();
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(());
        };

        if qty <= 0 {
            return self.remove_item(id);
        }

        item.quantity = u32::try_from(qty).unwrap_or(u32::MAX);
        debug!(id, qty = item.quantity, "cart quantity updated");
        self.save(items)
    }

    /// Empty the cart. The key stays in storage holding `[]`.
    pub fn clear_cart(&self) -> Result<(), CartError> {
        debug!("cart cleared");
        self.save(Vec::new())
    }

    /// Sum of price times quantity, recomputed from storage on every call.
    pub fn get_total(&self) -> f64 {
        self.read()
            .iter()
            .fold(0.0, |sum, item| sum + item.line_total())
    }

    /// Total units in the cart, as shown on the badge.
    pub fn get_item_count(&self) -> u32 {
        self.read()
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Push the current item count to every badge in `badges`.
    pub fn update_cart_badge(&self, badges: &BadgeSet) {
        badges.sync(self.get_item_count());
    }

    /// Register a listener that receives the full cart after every mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Vec<CartLineItem>) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// Re-read storage and notify listeners.
    ///
    /// For hosts that learn another writer (another tab or process sharing
    /// the profile) replaced the cart. No merge is attempted.
    pub fn notify_external_change(&self) {
        let items = self.read();
        debug!(lines = items.len(), "cart changed externally");
        self.listeners.emit(&items);
    }

    fn save(&self, items: Vec<CartLineItem>) -> Result<(), CartError> {
        let encoded =
            serde_json::to_string(&items).map_err(|e| CartError::Serde(e.to_string()))?;
        self.storage.set(&self.key, &encoded)?;
        self.listeners.emit(&items);
        Ok(())
    }

    fn normalize(&self, items: Vec<CartLineItem>) -> Vec<CartLineItem> {
        let stored = items.len();
        let mut seen = HashSet::with_capacity(stored);
        let items: Vec<CartLineItem> = items
            .into_iter()
            .filter(|item| item.quantity > 0 && seen.insert(item.id))
            .collect();

        if items.len() != stored {
            warn!(
                key = %self.key,
                dropped = stored - items.len(),
                "persisted cart had empty or duplicate lines"
            );
        }
        items
    }
}
