//! Walks a cart through add, update, badge sync and checkout against a
//! stub backend. Run with `RUST_LOG=debug` to see the store's logging.

use std::sync::Arc;

use mady_cart::{
    format_taka, ApiError, BadgeSet, CartConfig, CartStore, Checkout, CreatedOrder,
    CustomerDetails, InMemoryBadge, InMemoryStorage, MenuItemCandidate, OrderApi, OrderRequest,
    OrderSummary,
};
use tracing_subscriber::EnvFilter;

struct StubBackend;

impl OrderApi for StubBackend {
    fn create_order(&self, order: &OrderRequest) -> Result<CreatedOrder, ApiError> {
        println!(
            "POST /api/orders {}",
            serde_json::to_string(order).map_err(|e| ApiError::new(e.to_string()))?
        );
        Ok(CreatedOrder {
            id: 1001,
            status: Some("pending".into()),
            total_amount: None,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CartConfig::from_env()?;
    let store = CartStore::with_key(InMemoryStorage::new(), config.storage_key.clone());

    let badge = InMemoryBadge::new();
    let badges = Arc::new(BadgeSet::new());
    badges.add(badge.clone());
    badges.bind(&store);

    store.add_item(&MenuItemCandidate::new(1, "Beef Burger", 5.0, "/img/burger.jpg"))?;
    store.add_item(&MenuItemCandidate::new(1, "Beef Burger", 5.0, "/img/burger.jpg"))?;
    store.add_item(&MenuItemCandidate::new(2, "Fries", 2.5, "/img/fries.jpg"))?;
    store.update_qty(2, 3)?;
    println!("badge: {:?}", badge.state());

    let summary = OrderSummary::from_items(&store.read(), config.tax_rate);
    for line in &summary.lines {
        println!("{} x{} {}", line.name, line.quantity, format_taka(line.line_total));
    }
    println!(
        "subtotal {} tax {} -> {}",
        format_taka(summary.subtotal),
        format_taka(summary.tax),
        summary.place_order_label()
    );

    let details = CustomerDetails {
        full_name: "Rahim Uddin".into(),
        phone: "+880 1712-345678".into(),
        street: "House 12, Road 5".into(),
        city: "Dhaka".into(),
        zip: "1207".into(),
    };
    let order = Checkout::new(&store, &StubBackend).place_order(&details)?;
    println!("order {} placed; badge: {:?}", order.id, badge.state());
    Ok(())
}
