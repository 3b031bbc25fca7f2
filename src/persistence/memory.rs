// src/persistence/memory.rs
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Entity, Store, StoreError};

struct Table<T> {
    rows: HashMap<i64, T>,
    next_id: i64,
}

/// In-memory reference store: a mutex-guarded map per entity kind. Writers
/// hold the table lock for the whole call, so readers always observe a
/// consistent row.
pub struct MemoryStore<T> {
    table: Mutex<Table<T>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore {
            table: Mutex::new(Table {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Table<T>>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".to_string()))
    }

    /// Every row, for snapshotting.
    pub fn rows(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    /// Replaces the table contents, e.g. from a snapshot file.
    pub fn load(&self, rows: Vec<T>) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        table.next_id = rows.iter().map(Entity::id).max().unwrap_or(0) + 1;
        table.rows = rows.into_iter().map(|row| (row.id(), row)).collect();
        Ok(())
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl<T: Entity> Store<T> for MemoryStore<T> {
    fn insert(&self, entity: &mut T) -> Result<(), StoreError> {
        let mut table = self.lock()?;

        if entity.id() == 0 {
            entity.set_id(table.next_id);
            table.next_id += 1;
        } else if table.rows.contains_key(&entity.id()) {
            return Err(StoreError::Conflict(entity.id()));
        }

        table.rows.insert(entity.id(), entity.clone());
        Ok(())
    }

    fn update(&self, entity: &T) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        if !table.rows.contains_key(&entity.id()) {
            return Err(StoreError::NoSuchRow(entity.id()));
        }
        table.rows.insert(entity.id(), entity.clone());
        Ok(())
    }

    fn get_by_id(&self, id: i64) -> Result<Option<T>, StoreError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    fn find(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect())
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.lock()?;
        if table.rows.remove(&id).is_none() {
            return Err(StoreError::NoSuchRow(id));
        }
        Ok(())
    }
}
