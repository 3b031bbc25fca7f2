// src/persistence/json_file.rs
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Bid, Category, Product, User};

/// Full contents of the marketplace stores, for saving at shutdown and
/// reloading at startup.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub bids: Vec<Bid>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to open snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
    let file = File::open(path)?;
    let snapshot = serde_json::from_reader(BufReader::new(file))?;
    Ok(snapshot)
}

pub fn write_snapshot<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), snapshot)?;
    Ok(())
}
