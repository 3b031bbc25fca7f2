// src/domain/core.rs
use thiserror::Error;

use crate::money::{Amount, Currency};

pub type UserId = i64;
pub type ProductId = i64;
pub type CategoryId = i64;
pub type BidId = i64;

/// An identity of 0 marks an entity that has not been persisted yet; stores
/// assign the real identity on insert.
pub const UNSAVED: i64 = 0;

/// Everything a validator can reject an entity for.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("name must be between {min} and {max} characters: got {actual}")]
    NameLength { min: usize, max: usize, actual: usize },

    #[error("names may contain only letters, spaces and hyphens: {0:?}")]
    NameCharacters(String),

    #[error("every word of a name must start with an uppercase letter: {0:?}")]
    NameCasing(String),

    #[error("score cannot be negative")]
    NegativeScore,

    #[error("description must be between 10 and 200 characters: got {0}")]
    DescriptionLength(usize),

    #[error("the bidding window must start before it ends")]
    WindowOrder,

    #[error("the bidding window cannot start in the past")]
    WindowInPast,

    #[error("price must be positive")]
    NonPositivePrice,

    #[error("the owner of a listing must have the offerer role")]
    OwnerNotOfferer,

    #[error("only users with the bidder role can place bids")]
    BidderNotBidder,

    #[error("bid currency {bid} does not match listing currency {listing}")]
    CurrencyMismatch { bid: Currency, listing: Currency },

    #[error("bid placed after the bidding window closed")]
    BidAfterEnd,

    #[error("bid placed before the bidding window opened")]
    BidBeforeStart,

    #[error("a bid must exceed the current price {0}")]
    BidTooLow(Amount),

    #[error("a bid must stay under three times the current price {0}")]
    BidTooHigh(Amount),

    #[error("the listing is not open for bids")]
    ListingNotOpen,

    #[error("category graph contains a cycle at {0:?}")]
    CategoryCycle(String),
}
