// src/persistence/mod.rs
pub mod json_file;
pub mod memory;

use std::thread;
use std::time::Duration;

use log::warn;
use thiserror::Error;

use crate::domain::{Bid, Category, Product, User};

pub use self::memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("a row with id {0} already exists")]
    Conflict(i64),

    #[error("no row with id {0}")]
    NoSuchRow(i64),
}

/// Anything a store can hold: cloneable, with an `i64` identity where 0
/// means "not yet persisted".
pub trait Entity: Clone + Send {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! impl_entity {
    ($($ty:ty),*) => {
        $(impl Entity for $ty {
            fn id(&self) -> i64 {
                self.id
            }
            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })*
    };
}

impl_entity!(User, Product, Category, Bid);

/// CRUD collaborator contract the services are written against.
///
/// `insert` assigns an identity when the entity carries id 0. Absent rows are
/// reported through `Option`/`NoSuchRow`, never conflated with a storage
/// failure.
pub trait Store<T>: Send + Sync {
    fn insert(&self, entity: &mut T) -> Result<(), StoreError>;
    fn update(&self, entity: &T) -> Result<(), StoreError>;
    fn get_by_id(&self, id: i64) -> Result<Option<T>, StoreError>;
    fn find(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Vec<T>, StoreError>;
    fn delete(&self, id: i64) -> Result<(), StoreError>;
}

const READ_ATTEMPTS: u32 = 3;

/// Bounded retry with linear backoff, for idempotent reads only.
pub fn with_retries<T>(
    mut op: impl FnMut() -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < READ_ATTEMPTS => {
                warn!("store read failed (attempt {}): {}", attempt, err);
                thread::sleep(Duration::from_millis(10 * u64::from(attempt)));
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
