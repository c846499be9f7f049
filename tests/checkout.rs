mod support;

use mady_cart::{
    CartError, CartStore, Checkout, CheckoutError, InMemoryStorage, OrderLine, OrderSummary,
    DEFAULT_TAX_RATE,
};
use support::{burger, customer, fries, FlakyStorage, RecordingOrderApi};

#[test]
fn successful_order_submits_pairs_and_clears_cart() {
    let store = CartStore::new(InMemoryStorage::new());
    store.add_item(&burger()).unwrap();
    store.add_item(&burger()).unwrap();
    store.add_item(&fries()).unwrap();

    let api = RecordingOrderApi::accepting(41);
    let order = Checkout::new(&store, &api).place_order(&customer()).unwrap();
    assert_eq!(order.id, 41);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.customer_name, "Rahim Uddin");
    assert_eq!(request.customer_phone, "01712345678");
    assert_eq!(request.delivery_address, "House 12, Road 5, Dhaka 1207");
    assert_eq!(request.notes, "");
    assert_eq!(
        request.items,
        vec![
            OrderLine {
                menu_item_id: 1,
                quantity: 2
            },
            OrderLine {
                menu_item_id: 2,
                quantity: 1
            },
        ]
    );

    assert!(store.read().is_empty());
    assert_eq!(store.get_item_count(), 0);
}

#[test]
fn request_body_matches_backend_schema() {
    let store = CartStore::new(InMemoryStorage::new());
    store.add_item(&fries()).unwrap();

    let api = RecordingOrderApi::accepting(1);
    let request = Checkout::new(&store, &api).prepare(&customer()).unwrap();
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(
        body["items"],
        serde_json::json!([{ "menu_item_id": 2, "quantity": 1 }])
    );
    assert_eq!(body["customer_phone"], "01712345678");
    assert!(api.requests().is_empty());
}

#[test]
fn rejected_order_keeps_cart() {
    let store = CartStore::new(InMemoryStorage::new());
    store.add_item(&burger()).unwrap();

    let api = RecordingOrderApi::rejecting(422, "Menu item 1 is unavailable");
    let err = Checkout::new(&store, &api)
        .place_order(&customer())
        .unwrap_err();

    match &err {
        CheckoutError::OrderFailed(api_err) => {
            assert_eq!(api_err.status, Some(422));
            assert_eq!(api_err.message, "Menu item 1 is unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "Order failed: Menu item 1 is unavailable");
    assert_eq!(store.get_item_count(), 1);
}

#[test]
fn empty_cart_is_rejected_before_calling_backend() {
    let store = CartStore::new(InMemoryStorage::new());
    let api = RecordingOrderApi::accepting(1);

    let err = Checkout::new(&store, &api)
        .place_order(&customer())
        .unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
    assert!(api.requests().is_empty());
}

#[test]
fn invalid_details_do_not_submit() {
    let store = CartStore::new(InMemoryStorage::new());
    store.add_item(&burger()).unwrap();
    let api = RecordingOrderApi::accepting(1);

    let mut details = customer();
    details.phone = "+1 555 0100".into();
    let err = Checkout::new(&store, &api)
        .place_order(&details)
        .unwrap_err();

    assert_eq!(err, CheckoutError::InvalidPhone);
    assert!(api.requests().is_empty());
    assert_eq!(store.get_item_count(), 1);
}

#[test]
fn clear_failure_after_order_is_reported() {
    let storage = FlakyStorage::new();
    let store = CartStore::new(storage.clone());
    store.add_item(&burger()).unwrap();
    storage.fail_writes(true);

    let api = RecordingOrderApi::accepting(9);
    let err = Checkout::new(&store, &api)
        .place_order(&customer())
        .unwrap_err();

    match err {
        CheckoutError::ClearFailed { order, source } => {
            assert_eq!(order.id, 9);
            assert!(matches!(source, CartError::PersistenceUnavailable(_)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(api.requests().len(), 1);
    assert_eq!(store.get_item_count(), 1);
}

#[test]
fn summary_matches_cart_total() {
    let store = CartStore::new(InMemoryStorage::new());
    store.add_item(&burger()).unwrap();
    store.add_item(&burger()).unwrap();
    store.add_item(&fries()).unwrap();

    let summary = OrderSummary::from_items(&store.read(), DEFAULT_TAX_RATE);
    assert_eq!(summary.subtotal, store.get_total());
    assert_eq!(summary.lines.len(), 2);
    assert!((summary.total - 13.5).abs() < 1e-9);
}
