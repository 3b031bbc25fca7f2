// src/config.rs
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Marketplace tunables, read once at process start and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting score stamped on users the marketplace creates.
    pub default_score: f64,
    /// Edit distance at or under which two listing descriptions of the same
    /// owner count as duplicates.
    pub duplicate_distance: usize,
    /// Maximum number of simultaneously biddable listings per offerer.
    pub max_active_listings: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_score: 100.0,
            duplicate_distance: 3,
            max_active_listings: 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&text)?;
        Ok(settings)
    }

    /// Settings from the given file, falling back to defaults when the file
    /// is missing or malformed.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Settings::from_file(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("using default settings: {}", err);
                Settings::default()
            }
        }
    }
}
