//! Cart - line items and the persisted store that owns them.
//!
//! ## Example
//!
//! ```ignore
//! use mady_cart::{CartStore, InMemoryStorage, MenuItemCandidate};
//!
//! let store = CartStore::new(InMemoryStorage::new());
//! store.subscribe(|cart| println!("{} lines", cart.len()));
//!
//! store.add_item(&MenuItemCandidate::new(1, "Burger", 5.0, "/img/burger.jpg"))?;
//! store.add_item(&MenuItemCandidate::new(1, "Burger", 5.0, "/img/burger.jpg"))?;
//! assert_eq!(store.get_item_count(), 2);
//! ```

mod store;

use serde::{Deserialize, Serialize};

/// Storage key the cart owns when no other key is configured.
pub const DEFAULT_CART_KEY: &str = "mady_cart";

/// One row in the cart. Display fields are copied when the item is first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub quantity: u32,
}

impl CartLineItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A menu item offered to [`CartStore::add_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemCandidate {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
}

impl MenuItemCandidate {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: f64,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
        }
    }

    fn to_line_item(&self) -> CartLineItem {
        CartLineItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            quantity: 1,
        }
    }
}

pub use store::CartStore;
