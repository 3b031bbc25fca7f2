// src/services/users.rs
use std::sync::Arc;

use log::info;

use crate::domain::{Role, User, UserId};
use crate::persistence::{with_retries, Store};
use crate::validation::UserValidator;
use super::ServiceError;

pub struct UserService {
    store: Arc<dyn Store<User>>,
    validator: UserValidator,
    default_score: f64,
}

impl UserService {
    pub fn new(store: Arc<dyn Store<User>>, default_score: f64) -> Self {
        UserService {
            store,
            validator: UserValidator,
            default_score,
        }
    }

    /// A fresh, unsaved user carrying the configured starting score.
    pub fn new_user(&self, name: &str, role: Role) -> User {
        User::new(name, role, self.default_score)
    }

    pub fn add(&self, user: &mut User) -> Result<(), ServiceError> {
        self.validator.validate(user).map_err(|err| {
            info!("user {:?} rejected: {}", user.name, err);
            err
        })?;

        self.store.insert(user)?;
        info!("user {:?} added", user.name);
        Ok(())
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, ServiceError> {
        Ok(with_retries(|| self.store.get_by_id(id))?)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<User>, ServiceError> {
        let rows = with_retries(|| self.store.find(&|u: &User| u.name == name))?;
        Ok(rows.into_iter().next())
    }

    /// Update never creates: an unknown id is reported, not upserted.
    pub fn update(&self, user: &User) -> Result<(), ServiceError> {
        self.validator.validate(user).map_err(|err| {
            info!("user {:?} rejected: {}", user.name, err);
            err
        })?;

        if with_retries(|| self.store.get_by_id(user.id))?.is_none() {
            info!("user {} not found, nothing to update", user.id);
            return Err(ServiceError::NotFound);
        }

        self.store.update(user)?;
        info!("user {:?} updated", user.name);
        Ok(())
    }
}
