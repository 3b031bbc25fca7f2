// src/domain/bids.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Amount;
use super::core::{BidId, UNSAVED};
use super::products::Product;
use super::users::User;

/// One offer of a price by a bidder against a product's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    #[serde(rename = "placedAt")]
    pub placed_at: DateTime<Utc>,
    pub bidder: User,
    pub product: Product,
    pub amount: Amount,
}

impl Bid {
    pub fn new(bidder: User, product: Product, amount: Amount, placed_at: DateTime<Utc>) -> Self {
        Bid {
            id: UNSAVED,
            placed_at,
            bidder,
            product,
            amount,
        }
    }
}
