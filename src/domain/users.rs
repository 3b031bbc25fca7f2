// src/domain/users.rs
use serde::{Deserialize, Serialize};

use super::core::{UserId, UNSAVED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Places bids on other users' listings.
    Bidder,
    /// Offers products for bidding and manages their own listings.
    Offerer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub score: f64,
}

impl User {
    pub fn new(name: impl Into<String>, role: Role, score: f64) -> Self {
        User {
            id: UNSAVED,
            name: name.into(),
            role,
            score,
        }
    }
}
