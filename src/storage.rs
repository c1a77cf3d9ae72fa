// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Persisted client state: a JSON key/value file, in the spirit of browser
//! local storage.
//!
//! Reads never fail (a missing or malformed entry is `None`). Writes are
//! flushed to disk immediately; flush errors are logged and otherwise
//! ignored so a read-only disk never breaks a request.

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared key/value store, optionally backed by a JSON file.
#[derive(Clone, Default)]
pub struct LocalStorage {
    entries: Arc<DashMap<String, Value>>,
    path: Option<PathBuf>,
}

impl LocalStorage {
    /// Storage that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (or create on first write) a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = DashMap::new();

        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| StorageError::Io(e.to_string()))?;
            if !raw.trim().is_empty() {
                let map: BTreeMap<String, Value> =
                    serde_json::from_str(&raw).map_err(|e| StorageError::Parse(e.to_string()))?;
                for (key, value) in map {
                    entries.insert(key, value);
                }
            }
        }

        tracing::info!(path = %path.display(), keys = entries.len(), "Opened local storage");

        Ok(Self {
            entries: Arc::new(entries),
            path: Some(path),
        })
    }

    /// Read and decode a value.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?.value().clone();
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed storage entry");
                None
            }
        }
    }

    /// Encode and store a value, then flush.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.entries.insert(key.to_string(), v);
                self.flush();
            }
            Err(e) => tracing::warn!(key, error = %e, "Failed to encode storage entry"),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Storage view whose keys are prefixed with `namespace:`.
    pub fn scoped(&self, namespace: &str) -> ScopedStorage {
        ScopedStorage {
            storage: self.clone(),
            prefix: format!("{}:", namespace),
        }
    }

    fn flush(&self) {
        let Some(path) = &self.path else {
            return;
        };

        let snapshot: BTreeMap<String, Value> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        if let Err(e) = write_atomically(path, &snapshot) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to flush local storage");
        }
    }
}

fn write_atomically(path: &Path, snapshot: &BTreeMap<String, Value>) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(snapshot).map_err(|e| StorageError::Parse(e.to_string()))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body).map_err(|e| StorageError::Io(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::Io(e.to_string()))
}

/// Per-session slice of [`LocalStorage`].
#[derive(Clone)]
pub struct ScopedStorage {
    storage: LocalStorage,
    prefix: String,
}

impl ScopedStorage {
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.storage.get(&self.key(key))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        self.storage.set(&self.key(key), value)
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

/// Storage errors (only surfaced when opening the file).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage parse error: {0}")]
    Parse(String),
}
