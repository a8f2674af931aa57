// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Persistent download record store
//!
//! All records live in one JSON array under the `downloads` key. Records
//! are keyed by movie id: upserting replaces any record with the same id,
//! so re-downloading a movie never accumulates duplicates. Mutations are
//! serialized behind one async lock; reads go straight to the backend and
//! treat missing or corrupt data as an empty list so the downloads screen
//! never hard-fails on a bad blob.

use crate::download::record::DownloadRecord;
use crate::error::Result;
use crate::storage::backend::{read_json_soft, write_json, StorageBackend};
use std::sync::Arc;
use tokio::sync::Mutex;

const DOWNLOADS_KEY: &str = "downloads";

pub struct DownloadStore {
    backend: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl DownloadStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// All stored records. Missing or corrupt data yields an empty list.
    pub fn list(&self) -> Vec<DownloadRecord> {
        read_json_soft(self.backend.as_ref(), DOWNLOADS_KEY).unwrap_or_default()
    }

    /// Look up the record for one movie id.
    pub fn get(&self, id: u64) -> Option<DownloadRecord> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Replace the whole stored collection.
    pub async fn save_all(&self, records: &[DownloadRecord]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        write_json(self.backend.as_ref(), DOWNLOADS_KEY, &records)
    }

    /// Insert the record, replacing any existing record with the same id.
    pub async fn upsert(&self, record: DownloadRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        write_json(self.backend.as_ref(), DOWNLOADS_KEY, &records)
    }

    /// Remove and return the record for `id`; `None` when absent.
    pub async fn remove(&self, id: u64) -> Result<Option<DownloadRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list();
        let position = records.iter().position(|r| r.id == id);
        let removed = position.map(|i| records.remove(i));
        if removed.is_some() {
            write_json(self.backend.as_ref(), DOWNLOADS_KEY, &records)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Movie;
    use crate::download::record::DownloadStatus;
    use crate::storage::backend::MemoryBackend;

    fn store() -> DownloadStore {
        DownloadStore::new(Arc::new(MemoryBackend::new()))
    }

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: String::new(),
            vote_average: 0.0,
            genre_ids: Vec::new(),
        }
    }

    fn completed(id: u64, title: &str) -> DownloadRecord {
        DownloadRecord::completed(&movie(id, title), format!("/tmp/movie_{id}.mp4"))
    }

    fn failed(id: u64, title: &str) -> DownloadRecord {
        DownloadRecord::failed(&movie(id, title), "boom")
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let store = store();
        store.upsert(completed(1, "One")).await.unwrap();

        let record = store.get(1).unwrap();
        assert_eq!(record.title, "One");
        assert!(store.get(2).is_none());
    }

    #[tokio::test]
    async fn test_upsert_same_id_replaces() {
        let store = store();
        store.upsert(failed(7, "Seven")).await.unwrap();
        store.upsert(completed(7, "Seven")).await.unwrap();

        let records = store.list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, DownloadStatus::Completed);
    }

    #[tokio::test]
    async fn test_remove_returns_record() {
        let store = store();
        store.upsert(completed(3, "Three")).await.unwrap();

        let removed = store.remove(3).await.unwrap();
        assert_eq!(removed.unwrap().id, 3);
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_id_is_none() {
        let store = store();
        assert!(store.remove(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_on_corrupt_blob_is_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("downloads", "not json").unwrap();
        let store = DownloadStore::new(backend);
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_save_all_replaces_collection() {
        let store = store();
        store.upsert(completed(1, "One")).await.unwrap();

        store
            .save_all(&[completed(2, "Two"), failed(3, "Three")])
            .await
            .unwrap();

        let records = store.list();
        assert_eq!(records.len(), 2);
        assert!(store.get(1).is_none());
    }

    #[tokio::test]
    async fn test_upsert_preserves_other_records() {
        let store = store();
        store.upsert(completed(1, "One")).await.unwrap();
        store.upsert(completed(2, "Two")).await.unwrap();
        store.upsert(failed(1, "One")).await.unwrap();

        let records = store.list();
        assert_eq!(records.len(), 2);
        assert!(store.get(2).unwrap().is_completed());
    }
}
