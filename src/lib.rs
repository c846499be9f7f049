mod badge;
mod cart;
mod checkout;
mod config;
mod error;
mod notify;
mod storage;

pub use badge::{Badge, BadgeSet, BadgeState, InMemoryBadge};
pub use cart::{CartLineItem, CartStore, MenuItemCandidate, DEFAULT_CART_KEY};
pub use checkout::{
    format_taka, is_bd_mobile, ApiError, Checkout, CheckoutError, CreatedOrder, CustomerDetails,
    OrderApi, OrderLine, OrderRequest, OrderSummary, SummaryLine, DEFAULT_TAX_RATE,
};
pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use notify::{Listeners, Subscription};
pub use storage::{FileStorage, InMemoryStorage, KeyValueStore, StorageError};
