// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Download manager
//!
//! Owns the download directory, the record store, and the transfer
//! pipeline. `download_movie` always hands back a record describing the
//! outcome: completed records are persisted, failed ones are returned to
//! the caller and only persisted when the config opts in. Deleting a
//! download removes the file before the record, so a failed file delete
//! leaves the record in place for another attempt.

use crate::download::cancel::CancelToken;
use crate::download::record::{CatalogEntry, DownloadRecord};
use crate::download::store::DownloadStore;
use crate::download::transfer::transfer_to_file;
use crate::error::{Result, StreamioError};
use crate::storage::backend::StorageBackend;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for [`DownloadManager`].
#[derive(Debug, Clone)]
pub struct DownloadManagerConfig {
    /// Directory that holds downloaded movie files
    pub download_dir: PathBuf,
    /// Extension for downloaded files, without the dot
    pub file_extension: String,
    /// Persist error records instead of only returning them
    pub persist_failed: bool,
}

impl DownloadManagerConfig {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            file_extension: "mp4".to_string(),
            persist_failed: false,
        }
    }
}

pub struct DownloadManager {
    config: DownloadManagerConfig,
    http: Client,
    store: DownloadStore,
}

impl DownloadManager {
    pub fn new(config: DownloadManagerConfig, backend: Arc<dyn StorageBackend>) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            config,
            http,
            store: DownloadStore::new(backend),
        })
    }

    /// The record store, for screens that only read.
    pub fn store(&self) -> &DownloadStore {
        &self.store
    }

    /// All known download records.
    pub fn downloads(&self) -> Vec<DownloadRecord> {
        self.store.list()
    }

    /// Create the download directory if it does not exist yet.
    pub async fn ensure_download_directory(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.download_dir)
            .await
            .map_err(|e| {
                StreamioError::DownloadDirectoryInit(format!(
                    "{}: {}",
                    self.config.download_dir.display(),
                    e
                ))
            })
    }

    /// Where the file for one movie lives, downloaded or not.
    pub fn local_path_for(&self, movie_id: u64) -> PathBuf {
        self.config
            .download_dir
            .join(format!("movie_{}.{}", movie_id, self.config.file_extension))
    }

    /// Download `source_url` for the given catalog entry.
    ///
    /// Returns the resulting record in every case: a completed record
    /// (already persisted) on success, an error record on failure. An
    /// interrupted transfer leaves the partial file behind, and the next
    /// call for the same movie resumes from it.
    pub async fn download_movie(
        &self,
        entry: &dyn CatalogEntry,
        source_url: &str,
        cancel: CancelToken,
        on_progress: impl FnMut(f64),
    ) -> Result<DownloadRecord> {
        self.ensure_download_directory().await?;
        let dest = self.local_path_for(entry.id());

        match transfer_to_file(&self.http, source_url, &dest, cancel, on_progress).await {
            Ok(bytes) => {
                log::info!("downloaded {} ({} bytes) to {:?}", entry.title(), bytes, dest);
                let record = DownloadRecord::completed(entry, dest.to_string_lossy());
                self.store.upsert(record.clone()).await?;
                Ok(record)
            }
            Err(e) => {
                log::warn!("download of {} failed: {}", entry.title(), e);
                let record = DownloadRecord::failed(entry, e.user_message());
                if self.config.persist_failed {
                    self.store.upsert(record.clone()).await?;
                }
                Ok(record)
            }
        }
    }

    /// Delete the downloaded file and its record. Unknown ids are a no-op.
    /// The file goes first: if the delete fails the record survives, so
    /// the downloads screen still shows something the user can retry.
    pub async fn delete_download(&self, movie_id: u64) -> Result<()> {
        let Some(record) = self.store.get(movie_id) else {
            return Ok(());
        };

        // error records have no local uri but may have left a partial file
        let path = match &record.local_uri {
            Some(local_uri) => PathBuf::from(local_uri),
            None => self.local_path_for(movie_id),
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("download file {:?} already gone", path);
            }
            Err(e) => return Err(e.into()),
        }
        self.store.remove(movie_id).await?;
        Ok(())
    }
}
