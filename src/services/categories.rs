// src/services/categories.rs
use std::sync::Arc;

use log::{error, info};

use crate::domain::{Category, CategoryId, Product, UNSAVED};
use crate::persistence::{with_retries, Store, StoreError};
use crate::validation::{CategoryValidator, ProductValidator, UserValidator};
use super::ServiceError;

pub struct CategoryService {
    store: Arc<dyn Store<Category>>,
    products: Arc<dyn Store<Product>>,
    validator: CategoryValidator,
}

/// Rows written by one `add` call, so a mid-graph storage failure can be
/// compensated instead of leaving half the graph behind.
#[derive(Default)]
struct Rollback {
    categories: Vec<CategoryId>,
    products: Vec<i64>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn Store<Category>>, products: Arc<dyn Store<Product>>) -> Self {
        CategoryService {
            store,
            products,
            validator: CategoryValidator::new(ProductValidator::new(UserValidator)),
        }
    }

    /// Validates the whole graph up front, then creates it: parents and
    /// children with id 0 first (recursively), then the category itself —
    /// reusing the existing row's identity when the name is already taken —
    /// and finally the directly-filed products against the resolved
    /// category. A storage failure anywhere deletes the rows this call
    /// inserted before surfacing the error.
    pub fn add(&self, category: &mut Category) -> Result<(), ServiceError> {
        self.validator.validate(category).map_err(|err| {
            info!("category {:?} rejected: {}", category.name, err);
            err
        })?;

        let mut inserted = Rollback::default();
        match self.insert_graph(category, &mut inserted) {
            Ok(()) => {
                info!("category {:?} added", category.name);
                Ok(())
            }
            Err(err) => {
                self.roll_back(inserted);
                Err(err.into())
            }
        }
    }

    fn insert_graph(
        &self,
        category: &mut Category,
        inserted: &mut Rollback,
    ) -> Result<(), StoreError> {
        for parent in &mut category.parents {
            if parent.id == UNSAVED {
                self.insert_graph(parent, inserted)?;
            }
        }

        for child in &mut category.children {
            if child.id == UNSAVED {
                self.insert_graph(child, inserted)?;
            }
        }

        let name = category.name.clone();
        match self
            .store
            .find(&|c: &Category| c.name == name)?
            .into_iter()
            .next()
        {
            Some(existing) => {
                // Upsert by name: the caller's node adopts the stored
                // identity instead of creating a duplicate row.
                category.id = existing.id;
            }
            None => {
                let mut row = Category {
                    id: UNSAVED,
                    name: name.clone(),
                    parents: category.parents.iter().map(Category::as_link).collect(),
                    children: category.children.iter().map(Category::as_link).collect(),
                    products: Vec::new(),
                };
                self.store.insert(&mut row)?;
                category.id = row.id;
                inserted.categories.push(row.id);
            }
        }

        let link = category.as_link();
        for product in &mut category.products {
            product.category = link.clone();
            if product.id == UNSAVED {
                self.products.insert(product)?;
                inserted.products.push(product.id);
            }
        }

        Ok(())
    }

    fn roll_back(&self, inserted: Rollback) {
        for id in inserted.products.into_iter().rev() {
            if let Err(err) = self.products.delete(id) {
                error!("rollback of product {} failed: {}", id, err);
            }
        }
        for id in inserted.categories.into_iter().rev() {
            if let Err(err) = self.store.delete(id) {
                error!("rollback of category {} failed: {}", id, err);
            }
        }
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, ServiceError> {
        Ok(with_retries(|| self.store.get_by_id(id))?)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError> {
        let rows = with_retries(|| self.store.find(&|c: &Category| c.name == name))?;
        Ok(rows.into_iter().next())
    }

    pub fn update(&self, category: &Category) -> Result<(), ServiceError> {
        self.validator.validate(category).map_err(|err| {
            info!("category {:?} rejected: {}", category.name, err);
            err
        })?;

        if with_retries(|| self.store.get_by_id(category.id))?.is_none() {
            info!("category {} not found, nothing to update", category.id);
            return Err(ServiceError::NotFound);
        }

        self.store.update(category)?;
        info!("category {:?} updated", category.name);
        Ok(())
    }

    /// The named category's immediate sub-categories.
    pub fn children_of(&self, name: &str) -> Result<Vec<Category>, ServiceError> {
        let category = self.find_by_name(name)?.ok_or(ServiceError::NotFound)?;
        Ok(category.children)
    }

    /// The listings filed directly under the named category.
    pub fn products_of(&self, name: &str) -> Result<Vec<Product>, ServiceError> {
        self.find_by_name(name)?.ok_or(ServiceError::NotFound)?;
        let rows =
            with_retries(|| self.products.find(&|p: &Product| p.category.name == name))?;
        Ok(rows)
    }
}
