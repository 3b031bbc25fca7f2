// src/services/mod.rs
pub mod bids;
pub mod categories;
pub mod marketplace;
pub mod products;
pub mod users;

use thiserror::Error;

use crate::domain::ValidationError;
use crate::persistence::StoreError;

pub use self::bids::BidService;
pub use self::categories::CategoryService;
pub use self::marketplace::{MarketError, Marketplace};
pub use self::products::ProductService;
pub use self::users::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A domain rule was not satisfied. Retrying with the same input yields
    /// the same outcome, so callers never retry these.
    #[error("rejected: {0}")]
    Rejected(#[from] ValidationError),

    /// `get`/`update` against an id with no row behind it.
    #[error("entity not found")]
    NotFound,

    /// The candidate listing's description is within the configured edit
    /// distance of one of the owner's existing listings.
    #[error("a similar listing by the same owner already exists")]
    DuplicateListing,

    #[error(transparent)]
    Store(#[from] StoreError),
}
