#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mady_cart::{
    ApiError, CreatedOrder, CustomerDetails, InMemoryStorage, KeyValueStore, MenuItemCandidate,
    OrderApi, OrderRequest, StorageError,
};

pub fn burger() -> MenuItemCandidate {
    MenuItemCandidate::new(1, "Burger", 5.0, "/img/burger.jpg")
}

pub fn fries() -> MenuItemCandidate {
    MenuItemCandidate::new(2, "Fries", 2.5, "/img/fries.jpg")
}

pub fn lassi() -> MenuItemCandidate {
    MenuItemCandidate::new(3, "Mango Lassi", 3.25, "/img/lassi.jpg")
}

pub fn customer() -> CustomerDetails {
    CustomerDetails {
        full_name: "Rahim Uddin".into(),
        phone: "01712345678".into(),
        street: "House 12, Road 5".into(),
        city: "Dhaka".into(),
        zip: "1207".into(),
    }
}

/// Order backend that records every request and answers with a canned result.
#[derive(Clone)]
pub struct RecordingOrderApi {
    pub requests: Arc<Mutex<Vec<OrderRequest>>>,
    response: Result<CreatedOrder, ApiError>,
}

impl RecordingOrderApi {
    pub fn accepting(order_id: i64) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response: Ok(CreatedOrder {
                id: order_id,
                status: Some("pending".into()),
                total_amount: None,
            }),
        }
    }

    pub fn rejecting(status: u16, detail: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response: Err(ApiError::with_status(status, detail)),
        }
    }

    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl OrderApi for RecordingOrderApi {
    fn create_order(&self, order: &OrderRequest) -> Result<CreatedOrder, ApiError> {
        self.requests.lock().unwrap().push(order.clone());
        self.response.clone()
    }
}

/// Storage that reads normally but can be switched to reject writes, like a
/// browser profile that hit its quota.
#[derive(Clone, Default)]
pub struct FlakyStorage {
    inner: InMemoryStorage,
    fail_writes: Arc<Mutex<bool>>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

impl KeyValueStore for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
