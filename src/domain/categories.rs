// src/domain/categories.rs
use serde::{Deserialize, Serialize};

use super::core::{CategoryId, UNSAVED};
use super::products::Product;

/// A node in the catalog graph. Parents and children are carried as detached
/// sub-aggregates; a node with id 0 is created along with the category it
/// hangs off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parents: Vec<Category>,
    pub children: Vec<Category>,
    pub products: Vec<Product>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: UNSAVED,
            name: name.into(),
            parents: Vec::new(),
            children: Vec::new(),
            products: Vec::new(),
        }
    }

    /// A copy without sub-aggregates, for embedding into a product once the
    /// category identity is known.
    pub fn as_link(&self) -> Category {
        Category {
            id: self.id,
            name: self.name.clone(),
            parents: Vec::new(),
            children: Vec::new(),
            products: Vec::new(),
        }
    }
}
