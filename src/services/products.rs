// src/services/products.rs
use std::sync::Arc;

use log::info;

use crate::clock::Clock;
use crate::domain::{Product, ProductId};
use crate::persistence::{with_retries, Store};
use crate::similarity::DuplicateDetector;
use crate::validation::{CategoryValidator, ProductValidator, UserValidator};
use super::ServiceError;

pub struct ProductService {
    store: Arc<dyn Store<Product>>,
    validator: ProductValidator,
    categories: CategoryValidator,
    duplicates: DuplicateDetector,
    clock: Arc<dyn Clock>,
}

impl ProductService {
    pub fn new(
        store: Arc<dyn Store<Product>>,
        duplicates: DuplicateDetector,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let products = ProductValidator::new(UserValidator);
        ProductService {
            store,
            validator: products,
            categories: CategoryValidator::new(products),
            duplicates,
            clock,
        }
    }

    /// Full insert validation plus the near-duplicate scan over the owner's
    /// existing listings; nothing is persisted when either rejects.
    pub fn add(&self, product: &mut Product) -> Result<(), ServiceError> {
        self.validator
            .validate_insert(product, &self.categories, self.clock.now())
            .map_err(|err| {
                info!("listing {:?} rejected: {}", product.name, err);
                err
            })?;

        let owner = product.owner.name.clone();
        let existing = with_retries(|| self.store.find(&|p: &Product| p.owner.name == owner))?;
        if self.duplicates.is_near_duplicate(
            &product.description,
            existing.iter().map(|p| p.description.as_str()),
        ) {
            info!("listing {:?} rejected as a near-duplicate", product.name);
            return Err(ServiceError::DuplicateListing);
        }

        self.store.insert(product)?;
        info!("listing {:?} added", product.name);
        Ok(())
    }

    pub fn get(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        Ok(with_retries(|| self.store.get_by_id(id))?)
    }

    pub fn update(&self, product: &Product) -> Result<(), ServiceError> {
        self.validator.validate(product).map_err(|err| {
            info!("listing {:?} rejected: {}", product.name, err);
            err
        })?;

        if with_retries(|| self.store.get_by_id(product.id))?.is_none() {
            info!("listing {} not found, nothing to update", product.id);
            return Err(ServiceError::NotFound);
        }

        self.store.update(product)?;
        info!("listing {:?} updated", product.name);
        Ok(())
    }

    /// How many of the owner's listings can take a bid right now. Listings
    /// whose window has lapsed are expired as a side effect and the flip is
    /// persisted; already-inactive rows are left alone.
    pub fn active_listings(&self, owner_name: &str) -> Result<usize, ServiceError> {
        let now = self.clock.now();
        let rows =
            with_retries(|| self.store.find(&|p: &Product| p.owner.name == owner_name))?;

        let mut count = 0;
        for mut product in rows {
            let was_active = product.active;
            if product.check_and_expire(now) {
                count += 1;
            } else if was_active {
                self.store.update(&product)?;
            }
        }
        Ok(count)
    }
}
