// src/validation/users.rs
use crate::domain::{User, ValidationError};

#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl UserValidator {
    pub fn validate(&self, user: &User) -> Result<(), ValidationError> {
        self.check_name(&user.name)?;
        self.check_score(user.score)?;
        Ok(())
    }

    /// Length 3-100, letters/spaces/hyphens only, and every
    /// whitespace/hyphen-delimited word starts with an uppercase letter.
    fn check_name(&self, name: &str) -> Result<(), ValidationError> {
        let length = name.chars().count();
        if !(3..=100).contains(&length) {
            return Err(ValidationError::NameLength {
                min: 3,
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

        for word in name
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|w| !w.is_empty())
        {
            if word.chars().next().is_some_and(|c| c.is_lowercase()) {
                return Err(ValidationError::NameCasing(name.to_string()));
            }
        }

        Ok(())
    }

    fn check_score(&self, score: f64) -> Result<(), ValidationError> {
        if score < 0.0 {
            return Err(ValidationError::NegativeScore);
        }
        Ok(())
    }
}
