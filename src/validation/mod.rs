// src/validation/mod.rs
//
// One validator per entity. Validators are plain values wired together by
// explicit construction, hold no storage access, and short-circuit on the
// first failed check.
pub mod bids;
pub mod categories;
pub mod products;
pub mod users;

pub use self::bids::BidValidator;
pub use self::categories::CategoryValidator;
pub use self::products::ProductValidator;
pub use self::users::UserValidator;
