//! Key-value containers that snapshots are written into

use std::collections::BTreeMap;
use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};

/// Errors raised while reading or writing a store file
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("could not access save file : {0}")]
    Io(#[from] io::Error),

    #[error("save file is not valid JSON : {0}")]
    Json(#[from] serde_json::Error),
}

/// Opaque container the host persists for us
pub trait StateStore {
    fn put_floats(&mut self, key: &str, values: &[f32]);

    fn get_floats(&self, key: &str) -> Option<Vec<f32>>;

    fn put_int(&mut self, key: &str, value: i32);

    fn get_int(&self, key: &str) -> Option<i32>;
}

/// In-memory store that can be written to, and read back from, a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    floats: BTreeMap<String, Vec<f32>>,
    ints: BTreeMap<String, i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty() && self.ints.is_empty()
    }

    /// Load a store previously written by [`MemoryStore::save_to_path`]
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path.as_ref())?;
        let store = serde_json::from_str(&json)?;
        log::info!("Loaded saved state from {}", path.as_ref().display());
        Ok(store)
    }

    /// Write the store as JSON, replacing the file atomically
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        log::info!("Game state saved to {}", path.display());
        Ok(())
    }
}

impl StateStore for MemoryStore {
    fn put_floats(&mut self, key: &str, values: &[f32]) {
        self.floats.insert(key.to_string(), values.to_vec());
    }

    fn get_floats(&self, key: &str) -> Option<Vec<f32>> {
        self.floats.get(key).cloned()
    }

    fn put_int(&mut self, key: &str, value: i32) {
        self.ints.insert(key.to_string(), value);
    }

    fn get_int(&self, key: &str) -> Option<i32> {
        self.ints.get(key).copied()
    }
}
