// src/domain/products.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Amount;
use super::categories::Category;
use super::core::ProductId;
use super::users::User;

/// A listing offered for time-boxed bidding. `price` is the current standing
/// price: the starting price until the first accepted bid, the highest
/// accepted bid afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub owner: User,
    pub category: Category,
    #[serde(rename = "startsAt")]
    pub starts_at: DateTime<Utc>,
    #[serde(rename = "endsAt")]
    pub ends_at: DateTime<Utc>,
    pub price: Amount,
    pub active: bool,
}

impl Product {
    /// Pure window predicate: `starts_at <= now < ends_at`. Does not look at
    /// the `active` flag and never mutates.
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }

    /// Whether the listing can take a bid right now, without side effects.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.active && self.in_window(now)
    }

    /// Biddability check with auto-expiry: an active listing evaluated
    /// outside its window is flipped inactive before returning false. An
    /// already-inactive listing returns false without touching the dates, so
    /// re-running this is a no-op.
    ///
    /// Callers that want a pure query use `is_open`; callers of this method
    /// opt into the mutation and are expected to persist it.
    pub fn check_and_expire(&mut self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }

        if !self.in_window(now) {
            self.active = false;
            return false;
        }

        true
    }
}
