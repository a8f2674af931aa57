// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Storage backends
//!
//! One serialized value per key. [`FileBackend`] keeps each key in its own
//! JSON file under a data directory and writes atomically (temp file, then
//! rename) so a crash mid-write never leaves a half-written blob behind.

use crate::error::{Result, StreamioError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Pluggable key-value storage.
///
/// Values are opaque strings; the typed stores layered on top handle JSON
/// serialization. Implementations must be safe to share across tasks.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key backend rooted at a data directory.
#[derive(Debug)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .map_err(|e| StreamioError::StorageError(format!(
                "cannot create data directory {}: {}",
                data_dir.display(),
                e
            )))?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are fixed short names; anything path-like is a caller bug.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StreamioError::InvalidInput(format!(
                "invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.data_dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StreamioError::StorageError(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| {
            StreamioError::StorageError(format!("cannot write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            StreamioError::StorageError(format!("cannot replace {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StreamioError::StorageError(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// In-memory backend for tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| StreamioError::internal("storage mutex poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StreamioError::internal("storage mutex poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StreamioError::internal("storage mutex poisoned"))?;
        values.remove(key);
        Ok(())
    }
}

/// Read a JSON value under `key`, decoding into `T`.
///
/// Missing keys and undecodable blobs both yield `None`; decode failures are
/// logged and otherwise swallowed so a corrupt blob never takes the app down.
pub(crate) fn read_json_soft<T: serde::de::DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
) -> Option<T> {
    match backend.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding corrupt value under key {:?}: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("storage read failed for key {:?}: {}", key, e);
            None
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub(crate) fn write_json<T: serde::Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    backend.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path()).unwrap();

        assert_eq!(backend.get("downloads").unwrap(), None);
        backend.set("downloads", "[]").unwrap();
        assert_eq!(backend.get("downloads").unwrap().as_deref(), Some("[]"));

        backend.set("downloads", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            backend.get("downloads").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[test]
    fn test_file_backend_remove_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path()).unwrap();

        backend.set("profiles", "[]").unwrap();
        backend.remove("profiles").unwrap();
        backend.remove("profiles").unwrap();
        assert_eq!(backend.get("profiles").unwrap(), None);
    }

    #[test]
    fn test_file_backend_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path()).unwrap();

        assert!(backend.get("../escape").is_err());
        assert!(backend.set("a/b", "x").is_err());
        assert!(backend.set("", "x").is_err());
    }

    #[test]
    fn test_file_backend_no_tmp_leftover(){
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path()).unwrap();
        backend.set("settings", "{}").unwrap();

        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["settings.json".to_string()]);
    }

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
        backend.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
    }

    #[test]
    fn test_read_json_soft_on_corrupt_value() {
        let backend = MemoryBackend::new();
        backend.set("downloads", "not json at all").unwrap();
        let parsed: Option<Vec<u32>> = read_json_soft(&backend, "downloads");
        assert!(parsed.is_none());
    }
}
