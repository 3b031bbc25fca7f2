// src/domain/mod.rs
pub mod bids;
pub mod categories;
pub mod core;
pub mod products;
pub mod users;

pub use self::bids::*;
pub use self::categories::*;
pub use self::core::*;
pub use self::products::*;
pub use self::users::*;
