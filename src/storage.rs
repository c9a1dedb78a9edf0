//! Small persisted key/value store for client state that outlives a run.
//!
//! Backed by a flat TOML table (`key = "value"`). Every write rewrites the
//! whole file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

/// Key under which the active locale is persisted.
pub const LOCALE_KEY: &str = "locale";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read state file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse state file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode state: {0}")]
    EncodeError(#[from] toml::ser::Error),

    #[error("Failed to write state file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File-backed string map.
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`. A missing file reads as empty.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.read()?.remove(key))
    }

    /// Store `value` under `key`. An unparseable file is replaced by one
    /// holding only this entry.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let (mut entries, _) = self.read_for_update()?;
        if entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let (mut entries, repaired) = self.read_for_update()?;
        if entries.remove(key).is_none() && !repaired {
            return Ok(());
        }
        self.write(&entries)
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| StorageError::ParseError {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Current entries, or an empty map flagged `true` when the file does
    /// not parse and must be rewritten.
    fn read_for_update(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read() {
            Ok(entries) => Ok((entries, false)),
            Err(e @ StorageError::ParseError { .. }) => {
                tracing::warn!(error = %e, "Discarding unreadable state file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = toml::to_string(entries)?;
        let write_err = |e| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        // Write-then-rename so a crash never leaves a truncated file behind.
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }
}
