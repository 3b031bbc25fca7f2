// src/validation/bids.rs
use chrono::{DateTime, Utc};

use crate::domain::{Bid, Role, User, ValidationError};
use super::products::ProductValidator;
use super::users::UserValidator;

#[derive(Debug, Clone, Copy, Default)]
pub struct BidValidator {
    users: UserValidator,
    products: ProductValidator,
}

impl BidValidator {
    pub fn new(users: UserValidator, products: ProductValidator) -> Self {
        BidValidator { users, products }
    }

    /// Check order matters: bidder, product, currency, window, price, and
    /// finally whether the listing is open at `now`. The open check uses the
    /// pure predicate; expiring a stale listing is the caller's decision.
    pub fn validate(&self, bid: &Bid, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.check_bidder(&bid.bidder)?;
        self.products.validate(&bid.product)?;
        self.check_currency(bid)?;
        self.check_date(bid)?;
        self.check_price(bid)?;
        self.check_open(bid, now)?;
        Ok(())
    }

    fn check_bidder(&self, bidder: &User) -> Result<(), ValidationError> {
        self.users.validate(bidder)?;
        if bidder.role != Role::Bidder {
            return Err(ValidationError::BidderNotBidder);
        }
        Ok(())
    }

    fn check_currency(&self, bid: &Bid) -> Result<(), ValidationError> {
        let listing = bid.product.price.currency();
        if bid.amount.currency() != listing {
            return Err(ValidationError::CurrencyMismatch {
                bid: bid.amount.currency(),
                listing,
            });
        }
        Ok(())
    }

    fn check_date(&self, bid: &Bid) -> Result<(), ValidationError> {
        if bid.placed_at >= bid.product.ends_at {
            return Err(ValidationError::BidAfterEnd);
        }
        if bid.placed_at < bid.product.starts_at {
            return Err(ValidationError::BidBeforeStart);
        }
        Ok(())
    }

    /// A bid must land strictly inside the corridor
    /// `(current price, 3 x current price)`.
    fn check_price(&self, bid: &Bid) -> Result<(), ValidationError> {
        if bid.amount.value() <= 0 {
            return Err(ValidationError::NonPositivePrice);
        }
        if bid.amount.value() <= bid.product.price.value() {
            return Err(ValidationError::BidTooLow(bid.product.price));
        }
        if bid.amount.value() >= 3 * bid.product.price.value() {
            return Err(ValidationError::BidTooHigh(bid.product.price));
        }
        Ok(())
    }

    fn check_open(&self, bid: &Bid, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if !bid.product.is_open(now) {
            return Err(ValidationError::ListingNotOpen);
        }
        Ok(())
    }
}
