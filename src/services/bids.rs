// src/services/bids.rs
use std::sync::Arc;

use log::info;

use crate::clock::Clock;
use crate::domain::{Bid, BidId};
use crate::persistence::{with_retries, Store};
use crate::validation::{BidValidator, ProductValidator, UserValidator};
use super::ServiceError;

pub struct BidService {
    store: Arc<dyn Store<Bid>>,
    validator: BidValidator,
    clock: Arc<dyn Clock>,
}

impl BidService {
    pub fn new(store: Arc<dyn Store<Bid>>, clock: Arc<dyn Clock>) -> Self {
        BidService {
            store,
            validator: BidValidator::new(UserValidator, ProductValidator::new(UserValidator)),
            clock,
        }
    }

    pub fn add(&self, bid: &mut Bid) -> Result<(), ServiceError> {
        self.validator
            .validate(bid, self.clock.now())
            .map_err(|err| {
                info!(
                    "bid of {} on {:?} rejected: {}",
                    bid.amount, bid.product.name, err
                );
                err
            })?;

        self.store.insert(bid)?;
        info!("bid of {} on {:?} accepted", bid.amount, bid.product.name);
        Ok(())
    }

    pub fn get(&self, id: BidId) -> Result<Option<Bid>, ServiceError> {
        Ok(with_retries(|| self.store.get_by_id(id))?)
    }

    pub fn update(&self, bid: &Bid) -> Result<(), ServiceError> {
        self.validator.validate(bid, self.clock.now())?;

        if with_retries(|| self.store.get_by_id(bid.id))?.is_none() {
            info!("bid {} not found, nothing to update", bid.id);
            return Err(ServiceError::NotFound);
        }

        self.store.update(bid)?;
        Ok(())
    }
}
