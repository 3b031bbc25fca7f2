use std::str::FromStr;

use auction_market::money::{Amount, Currency};
use auction_market::web::types::{ListingItem, ListingRequest};

mod utils;
use utils::{bluza, ron, valentina};

#[test]
fn test_amount_string_form() {
    let amount = ron(10);
    assert_eq!(amount.to_string(), "RON10");

    let parsed = Amount::from_str("RON10").unwrap();
    assert_eq!(parsed, amount);

    assert!(Amount::from_str("10").is_err());
    assert!(Amount::from_str("XYZ10").is_err());
}

#[test]
fn test_amount_survives_json() {
    let amount = Amount::new(Currency::GBP, 42);
    let json = serde_json::to_string(&amount).unwrap();
    assert_eq!(json, "\"GBP42\"");

    let back: Amount = serde_json::from_str(&json).unwrap();
    assert_eq!(back, amount);
}

#[test]
fn test_listing_request_deserializes() {
    let json = r#"{
        "name": "Bluza",
        "description": "Bluza marca Zara, Marimea M",
        "category": "Haine",
        "startsAt": "2023-07-01T08:00:00Z",
        "endsAt": "2023-07-24T08:00:00Z",
        "price": 10,
        "currency": "RON"
    }"#;

    let request: ListingRequest = serde_json::from_str(json).unwrap();
    let product = request.to_product(valentina());

    assert_eq!(product.name, "Bluza");
    assert_eq!(product.category.name, "Haine");
    assert_eq!(product.price, ron(10));
    assert!(product.active);
}

#[test]
fn test_listing_item_shape() {
    let product = bluza();
    let item = ListingItem::from(&product);
    let json = serde_json::to_value(&item).unwrap();

    assert_eq!(json["name"], "Bluza");
    assert_eq!(json["owner"], "Valentina");
    assert_eq!(json["category"], "Haine");
    assert_eq!(json["price"], "RON10");
    assert_eq!(json["active"], true);
}
