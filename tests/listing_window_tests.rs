use chrono::Duration;

mod utils;
use utils::{bluza, sample_ends_at, sample_now, sample_starts_at};

#[test]
fn test_inactive_listing_is_never_open() {
    let mut product = bluza();
    product.active = false;

    // Any instant, including one inside the window.
    assert!(!product.check_and_expire(sample_now() + Duration::days(1)));
    assert!(!product.active);
}

#[test]
fn test_active_listing_inside_the_window_is_open() {
    let mut product = bluza();

    assert!(product.check_and_expire(sample_now() + Duration::days(1)));
    assert!(product.active);
}

#[test]
fn test_window_bounds_are_start_inclusive_end_exclusive() {
    let product = bluza();

    assert!(product.in_window(sample_starts_at()));
    assert!(product.in_window(sample_ends_at() - Duration::seconds(1)));
    assert!(!product.in_window(sample_ends_at()));
    assert!(!product.in_window(sample_starts_at() - Duration::seconds(1)));
}

#[test]
fn test_lapsed_listing_expires_on_read() {
    let mut product = bluza();

    assert!(!product.check_and_expire(sample_ends_at() + Duration::seconds(1)));
    assert!(!product.active);
}

#[test]
fn test_listing_checked_before_its_window_expires_too() {
    let mut product = bluza();

    assert!(!product.check_and_expire(sample_starts_at() - Duration::seconds(1)));
    assert!(!product.active);
}

#[test]
fn test_expiry_is_idempotent() {
    let mut product = bluza();

    assert!(!product.check_and_expire(sample_ends_at()));
    let expired = product.clone();

    // A second evaluation of the already-expired listing changes nothing.
    assert!(!product.check_and_expire(sample_ends_at() + Duration::days(1)));
    assert_eq!(product, expired);
}

#[test]
fn test_is_open_is_pure() {
    let product = bluza();
    let before = product.clone();

    assert!(product.is_open(sample_now() + Duration::days(1)));
    assert!(!product.is_open(sample_ends_at()));
    assert_eq!(product, before);
}
