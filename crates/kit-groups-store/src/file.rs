//! JSON-file implementation of the configuration store.
//!
//! The configuration lives in a single pretty-printed JSON file, matching
//! the document format operators edit by hand. A missing file means no
//! configuration was ever saved; unparseable content is surfaced as
//! [`StoreError::Malformed`] so the caller can fall back to defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::traits::ConfigStore;

/// Configuration store backed by a single JSON file.
pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    /// Create a store reading and writing the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn load(&self) -> Result<Option<Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }

    fn save(&self, document: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let text = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
