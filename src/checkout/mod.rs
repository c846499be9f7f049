//! Checkout - turns the cart into an order submission.
//!
//! The cart is cleared only after the [`OrderApi`] confirms the order was
//! created. Any failure before that point leaves the cart untouched.

mod details;
mod summary;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cart::{CartLineItem, CartStore};
use crate::error::CartError;
use crate::storage::KeyValueStore;

pub use details::{is_bd_mobile, CustomerDetails};
pub use summary::{format_taka, OrderSummary, SummaryLine, DEFAULT_TAX_RATE};

/// One `{menu_item_id, quantity}` pair in an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: i64,
    pub quantity: u32,
}

impl From<&CartLineItem> for OrderLine {
    fn from(item: &CartLineItem) -> Self {
        Self {
            menu_item_id: item.id,
            quantity: item.quantity,
        }
    }
}

/// JSON body posted to the backend's order endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub notes: String,
    pub items: Vec<OrderLine>,
}

/// What the backend returns once an order exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

/// Failure reported by the order backend. `message` is the response's
/// `detail` field, or the HTTP status text when there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// The backend endpoint that accepts orders.
///
/// Implementations wrap whatever HTTP client the host uses.
pub trait OrderApi {
    fn create_order(&self, order: &OrderRequest) -> Result<CreatedOrder, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutError {
    EmptyCart,
    MissingName,
    MissingPhone,
    InvalidPhone,
    MissingAddress,
    /// The backend rejected the order; the cart was kept.
    OrderFailed(ApiError),
    /// The order was created but the cart could not be cleared. The order
    /// is carried so the caller can still confirm it.
    ClearFailed {
        order: CreatedOrder,
        source: CartError,
    },
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutError::EmptyCart => write!(f, "Your cart is empty!"),
            CheckoutError::MissingName => write!(f, "Please enter your full name."),
            CheckoutError::MissingPhone => write!(f, "Please enter your phone number."),
            CheckoutError::InvalidPhone => write!(
                f,
                "Please enter a valid Bangladeshi phone number (e.g., 017XXXXXXXX)."
            ),
            CheckoutError::MissingAddress => write!(f, "Please enter your delivery address."),
            CheckoutError::OrderFailed(err) => write!(f, "Order failed: {}", err.message),
            CheckoutError::ClearFailed { order, source } => {
                write!(f, "order {} was placed but {}", order.id, source)
            }
        }
    }
}

impl std::error::Error for CheckoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckoutError::OrderFailed(err) => Some(err),
            CheckoutError::ClearFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Builds and submits orders from a cart.
pub struct Checkout<'a, S, A> {
    store: &'a CartStore<S>,
    api: &'a A,
}

impl<'a, S: KeyValueStore, A: OrderApi> Checkout<'a, S, A> {
    pub fn new(store: &'a CartStore<S>, api: &'a A) -> Self {
        Self { store, api }
    }

    /// Validate `details` against the current cart and build the request
    /// without submitting it.
    pub fn prepare(&self, details: &CustomerDetails) -> Result<OrderRequest, CheckoutError> {
        let cart = self.store.read();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        details.validate()?;

        Ok(OrderRequest {
            customer_name: details.full_name.trim().to_string(),
            customer_phone: details.phone.trim().to_string(),
            delivery_address: details.delivery_address(),
            notes: String::new(),
            items: cart.iter().map(OrderLine::from).collect(),
        })
    }

    /// Submit the cart as an order and clear it once the backend accepts.
    pub fn place_order(&self, details: &CustomerDetails) -> Result<CreatedOrder, CheckoutError> {
        let request = self.prepare(details)?;

        let order = self.api.create_order(&request).map_err(|err| {
            warn!(error = %err, "order submission failed; cart kept");
            CheckoutError::OrderFailed(err)
        })?;

        if let Err(source) = self.store.clear_cart() {
            warn!(order_id = order.id, error = %source, "order placed but cart not cleared");
            return Err(CheckoutError::ClearFailed { order, source });
        }
        info!(order_id = order.id, lines = request.items.len(), "order placed");
        Ok(order)
    }
}
