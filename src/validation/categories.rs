// src/validation/categories.rs
use std::collections::HashSet;

use crate::domain::{Category, ValidationError};
use super::products::ProductValidator;

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryValidator {
    products: ProductValidator,
}

impl CategoryValidator {
    pub fn new(products: ProductValidator) -> Self {
        CategoryValidator { products }
    }

    /// Validates the category and, recursively, every parent and child with
    /// the same full validation; directly-filed products are checked with the
    /// nested entry point.
    ///
    /// The walk tracks the names on the current path. A name reappearing
    /// below itself is a cycle and fails validation; the same name reached
    /// on two separate branches (a diamond) is fine.
    pub fn validate(&self, category: &Category) -> Result<(), ValidationError> {
        let mut path = HashSet::new();
        self.validate_walk(category, &mut path)
    }

    fn validate_walk(
        &self,
        category: &Category,
        path: &mut HashSet<String>,
    ) -> Result<(), ValidationError> {
        if !path.insert(category.name.clone()) {
            return Err(ValidationError::CategoryCycle(category.name.clone()));
        }

        self.check_name(&category.name)?;

        for parent in &category.parents {
            self.validate_walk(parent, path)?;
        }

        for child in &category.children {
            self.validate_walk(child, path)?;
        }

        for product in &category.products {
            self.products.validate_nested(product)?;
        }

        path.remove(&category.name);
        Ok(())
    }

    fn check_name(&self, name: &str) -> Result<(), ValidationError> {
        let length = name.chars().count();
        if !(2..=100).contains(&length) {
            return Err(ValidationError::NameLength {
                min: 2,
                max: 100,
                actual: length,
            });
        }

        if !name
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-')
        {
            return Err(ValidationError::NameCharacters(name.to_string()));
        }

        Ok(())
    }
}
