use chrono::Duration;

use auction_market::domain::{Role, ValidationError};
use auction_market::validation::{
    BidValidator, CategoryValidator, ProductValidator, UserValidator,
};

mod utils;
use utils::{
    andrei, bid_on, bluza, bogdan, eur, haine, ron, sample_bid_time, sample_ends_at,
    sample_now, sample_starts_at, valentina,
};

fn product_validator() -> ProductValidator {
    ProductValidator::new(UserValidator)
}

fn category_validator() -> CategoryValidator {
    CategoryValidator::new(product_validator())
}

fn bid_validator() -> BidValidator {
    BidValidator::new(UserValidator, product_validator())
}

// --- users ---

#[test]
fn test_user_names() {
    let validator = UserValidator;

    for name in ["Ana Maria", "Ana-Maria", "Ana", "Valentina"] {
        let mut user = valentina();
        user.name = name.to_string();
        assert!(validator.validate(&user).is_ok(), "{:?} should be valid", name);
    }

    // Digits and symbols are out; so is a lowercase word start.
    for name in ["Ana4", "Ana#", "ana", "Ana maria", "An"] {
        let mut user = valentina();
        user.name = name.to_string();
        assert!(validator.validate(&user).is_err(), "{:?} should be invalid", name);
    }

    let mut user = valentina();
    user.name = "A".repeat(101);
    assert_eq!(
        validator.validate(&user),
        Err(ValidationError::NameLength { min: 3, max: 100, actual: 101 })
    );
}

#[test]
fn test_user_score_must_not_be_negative() {
    let mut user = andrei();
    user.score = -1.0;
    assert_eq!(UserValidator.validate(&user), Err(ValidationError::NegativeScore));

    user.score = 0.0;
    assert!(UserValidator.validate(&user).is_ok());
}

// --- categories ---

#[test]
fn test_category_name_length() {
    let validator = category_validator();

    let mut category = haine();
    category.name = "H".to_string();
    assert!(validator.validate(&category).is_err());

    category.name = "Ha".to_string();
    assert!(validator.validate(&category).is_ok());
}

#[test]
fn test_category_name_rejects_digits_and_symbols() {
    let validator = category_validator();

    for name in ["Haine4", "Haine!", "Haine_vechi"] {
        let mut category = haine();
        category.name = name.to_string();
        assert_eq!(
            validator.validate(&category),
            Err(ValidationError::NameCharacters(name.to_string()))
        );
    }

    // Lowercase category names are fine; the per-word casing rule is a user
    // name rule.
    let mut category = haine();
    category.name = "haine de vara".to_string();
    assert!(validator.validate(&category).is_ok());
}

#[test]
fn test_category_validates_parents_and_children_recursively() {
    let validator = category_validator();

    let mut category = haine();
    let mut parent = auction_market::domain::Category::new("Imbracaminte");
    parent.name = "I".to_string(); // too short
    category.parents.push(parent);
    assert!(validator.validate(&category).is_err());

    let mut category = haine();
    category.children.push(auction_market::domain::Category::new("Bluze!"));
    assert!(validator.validate(&category).is_err());
}

#[test]
fn test_category_cycle_is_rejected() {
    let mut category = haine();
    let mut parent = auction_market::domain::Category::new("Imbracaminte");
    // The parent's own parent claims the starting category's name again.
    parent.parents.push(haine());
    category.parents.push(parent);

    assert_eq!(
        category_validator().validate(&category),
        Err(ValidationError::CategoryCycle("Haine".to_string()))
    );
}

#[test]
fn test_diamond_shaped_graphs_are_allowed() {
    // Two branches meeting in the same grandparent is sharing, not a cycle.
    let grandparent = auction_market::domain::Category::new("Magazin");
    let mut left = auction_market::domain::Category::new("Imbracaminte");
    left.parents.push(grandparent.clone());
    let mut right = auction_market::domain::Category::new("Accesorii");
    right.parents.push(grandparent);

    let mut category = haine();
    category.parents.push(left);
    category.parents.push(right);

    assert!(category_validator().validate(&category).is_ok());
}

#[test]
fn test_category_checks_nested_products_without_their_category() {
    let validator = category_validator();

    let mut category = haine();
    category.products.push(bluza());
    assert!(validator.validate(&category).is_ok());

    // A nested product owned by a bidder fails the owner check.
    let mut category = haine();
    let mut product = bluza();
    product.owner = andrei();
    category.products.push(product);
    assert_eq!(
        validator.validate(&category),
        Err(ValidationError::OwnerNotOfferer)
    );
}

// --- products ---

#[test]
fn test_valid_listing() {
    let result =
        product_validator().validate_insert(&bluza(), &category_validator(), sample_now());
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn test_listing_name_length() {
    let validator = product_validator();

    let mut product = bluza();
    product.name = "B".to_string();
    assert!(validator.validate(&product).is_err());

    product.name = "B".repeat(101);
    assert!(validator.validate(&product).is_err());

    product.name = "Bl".to_string();
    assert!(validator.validate(&product).is_ok());
}

#[test]
fn test_listing_description_length() {
    let validator = product_validator();

    let mut product = bluza();
    product.description = "Scurt".to_string();
    assert_eq!(
        validator.validate(&product),
        Err(ValidationError::DescriptionLength(5))
    );

    product.description = "x".repeat(201);
    assert_eq!(
        validator.validate(&product),
        Err(ValidationError::DescriptionLength(201))
    );
}

#[test]
fn test_listing_window_must_be_ordered() {
    let mut product = bluza();
    product.ends_at = product.starts_at;
    assert_eq!(
        product_validator().validate(&product),
        Err(ValidationError::WindowOrder)
    );
}

#[test]
fn test_listing_price_must_be_positive() {
    let mut product = bluza();
    product.price = ron(0);
    assert_eq!(
        product_validator().validate(&product),
        Err(ValidationError::NonPositivePrice)
    );
}

#[test]
fn test_listing_cannot_start_in_the_past() {
    let now = sample_now() + Duration::hours(1);
    assert_eq!(
        product_validator().validate_insert(&bluza(), &category_validator(), now),
        Err(ValidationError::WindowInPast)
    );
}

#[test]
fn test_listing_owner_must_be_an_offerer() {
    let mut product = bluza();
    product.owner = andrei();
    assert_eq!(
        product_validator().validate_insert(&product, &category_validator(), sample_now()),
        Err(ValidationError::OwnerNotOfferer)
    );
}

#[test]
fn test_listing_category_is_checked_on_insert_only() {
    let mut product = bluza();
    product.category.name = "H!".to_string();

    let validator = product_validator();
    assert!(validator
        .validate_insert(&product, &category_validator(), sample_now())
        .is_err());

    // The update path leaves the category alone.
    assert!(validator.validate(&product).is_ok());
}

// --- bids ---

#[test]
fn test_valid_bid() {
    let bid = bid_on(&bluza(), andrei(), ron(20));
    let result = bid_validator().validate(&bid, sample_bid_time());
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn test_bidder_must_have_the_bidder_role() {
    let bid = bid_on(&bluza(), valentina(), ron(20));
    assert_eq!(
        bid_validator().validate(&bid, sample_bid_time()),
        Err(ValidationError::BidderNotBidder)
    );
}

#[test]
fn test_bid_currency_must_match_the_listing() {
    let bid = bid_on(&bluza(), andrei(), eur(20));
    assert!(matches!(
        bid_validator().validate(&bid, sample_bid_time()),
        Err(ValidationError::CurrencyMismatch { .. })
    ));
}

#[test]
fn test_bid_price_corridor_is_strict_on_both_ends() {
    let validator = bid_validator();

    // Equal to the current price: too low.
    let bid = bid_on(&bluza(), andrei(), ron(10));
    assert_eq!(
        validator.validate(&bid, sample_bid_time()),
        Err(ValidationError::BidTooLow(ron(10)))
    );

    // Exactly three times the current price: too high.
    let bid = bid_on(&bluza(), andrei(), ron(30));
    assert_eq!(
        validator.validate(&bid, sample_bid_time()),
        Err(ValidationError::BidTooHigh(ron(10)))
    );

    // Strictly inside the corridor on both ends.
    for value in [11, 20, 29] {
        let bid = bid_on(&bluza(), andrei(), ron(value));
        assert!(validator.validate(&bid, sample_bid_time()).is_ok());
    }
}

#[test]
fn test_bid_must_fall_inside_the_window() {
    let validator = bid_validator();

    let mut bid = bid_on(&bluza(), bogdan(), ron(20));
    bid.placed_at = sample_ends_at();
    assert_eq!(
        validator.validate(&bid, sample_bid_time()),
        Err(ValidationError::BidAfterEnd)
    );

    bid.placed_at = sample_starts_at() - Duration::seconds(1);
    assert_eq!(
        validator.validate(&bid, sample_bid_time()),
        Err(ValidationError::BidBeforeStart)
    );
}

#[test]
fn test_bid_on_a_closed_listing_is_rejected() {
    let mut product = bluza();
    product.active = false;
    let bid = bid_on(&product, andrei(), ron(20));

    assert_eq!(
        bid_validator().validate(&bid, sample_bid_time()),
        Err(ValidationError::ListingNotOpen)
    );

    // Still active, but evaluated after the window closed.
    let bid = bid_on(&bluza(), andrei(), ron(20));
    assert_eq!(
        bid_validator().validate(&bid, sample_ends_at() + Duration::days(1)),
        Err(ValidationError::ListingNotOpen)
    );
}
