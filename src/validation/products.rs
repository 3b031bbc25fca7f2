// src/validation/products.rs
use chrono::{DateTime, Utc};

use crate::domain::{Product, Role, User, ValidationError};
use super::categories::CategoryValidator;
use super::users::UserValidator;

/// Product rules come in three strengths:
///
/// * `validate_insert` — everything, for a brand-new listing;
/// * `validate` — the shared field checks, for updates to a listing that is
///   already in the catalog;
/// * `validate_nested` — shared checks plus the owner, for products reached
///   through a category under validation. The category itself is deliberately
///   skipped here; that asymmetry is what keeps Category and Product
///   validation from recursing into each other forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductValidator {
    users: UserValidator,
}

impl ProductValidator {
    pub fn new(users: UserValidator) -> Self {
        ProductValidator { users }
    }

    pub fn validate_insert(
        &self,
        product: &Product,
        categories: &CategoryValidator,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if product.starts_at < now {
            return Err(ValidationError::WindowInPast);
        }

        self.check_common(product)?;
        self.check_owner(&product.owner)?;
        categories.validate(&product.category)?;
        Ok(())
    }

    pub fn validate(&self, product: &Product) -> Result<(), ValidationError> {
        self.check_common(product)
    }

    pub fn validate_nested(&self, product: &Product) -> Result<(), ValidationError> {
        self.check_common(product)?;
        self.check_owner(&product.owner)?;
        Ok(())
    }

    fn check_common(&self, product: &Product) -> Result<(), ValidationError> {
        self.check_name(&product.name)?;
        self.check_description(&product.description)?;
        self.check_window(product)?;
        self.check_price(product)?;
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
        Ok(())
    }

    fn check_description(&self, description: &str) -> Result<(), ValidationError> {
        let length = description.chars().count();
        if !(10..=200).contains(&length) {
            return Err(ValidationError::DescriptionLength(length));
        }
        Ok(())
    }

    fn check_window(&self, product: &Product) -> Result<(), ValidationError> {
        if product.starts_at >= product.ends_at {
            return Err(ValidationError::WindowOrder);
        }
        Ok(())
    }

    fn check_price(&self, product: &Product) -> Result<(), ValidationError> {
        if product.price.value() <= 0 {
            return Err(ValidationError::NonPositivePrice);
        }
        Ok(())
    }

    fn check_owner(&self, owner: &User) -> Result<(), ValidationError> {
        self.users.validate(owner)?;
        if owner.role != Role::Offerer {
            return Err(ValidationError::OwnerNotOfferer);
        }
        Ok(())
    }
}
