// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Download records
//!
//! The persisted shape matches what the app already stores: lowercase
//! status strings and a camelCase `localUri`. A record carries a local
//! URI exactly when its status is `Completed`; the constructors are the
//! only way this module builds records, which keeps that pairing intact.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Where a download is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Downloading,
    Completed,
    Error,
}

/// One tracked download, keyed by the catalog movie id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub status: DownloadStatus,
    /// Completion fraction as a percentage, when known
    #[serde(default)]
    pub progress: Option<f64>,
    /// Absolute path of the finished file; present iff completed
    #[serde(rename = "localUri", default)]
    pub local_uri: Option<String>,
    /// Failure description for error records
    #[serde(default)]
    pub error: Option<String>,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl DownloadRecord {
    /// Record for a transfer that finished and landed at `local_uri`.
    pub fn completed(entry: &dyn CatalogEntry, local_uri: impl Into<String>) -> Self {
        Self {
            id: entry.id(),
            title: entry.title().to_string(),
            poster_path: entry.poster_path().map(str::to_string),
            status: DownloadStatus::Completed,
            progress: Some(100.0),
            local_uri: Some(local_uri.into()),
            error: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Record for a transfer that failed with `error`.
    pub fn failed(entry: &dyn CatalogEntry, error: impl Into<String>) -> Self {
        Self {
            id: entry.id(),
            title: entry.title().to_string(),
            poster_path: entry.poster_path().map(str::to_string),
            status: DownloadStatus::Error,
            progress: None,
            local_uri: None,
            error: Some(error.into()),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Record for a transfer still in flight.
    pub fn downloading(entry: &dyn CatalogEntry, progress: f64) -> Self {
        Self {
            id: entry.id(),
            title: entry.title().to_string(),
            poster_path: entry.poster_path().map(str::to_string),
            status: DownloadStatus::Downloading,
            progress: Some(progress),
            local_uri: None,
            error: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == DownloadStatus::Completed
    }
}

/// The catalog fields a download needs. Lets the manager accept list
/// movies, full details, or an existing record interchangeably.
pub trait CatalogEntry {
    fn id(&self) -> u64;
    fn title(&self) -> &str;
    fn poster_path(&self) -> Option<&str>;
}

impl CatalogEntry for crate::catalog::Movie {
    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }
}

impl CatalogEntry for crate::catalog::MovieDetails {
    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }
}

impl CatalogEntry for DownloadRecord {
    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Movie;

    fn movie() -> Movie {
        Movie {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: None,
            overview: String::new(),
            release_date: "1999-03-30".to_string(),
            vote_average: 8.2,
            genre_ids: vec![28, 878],
        }
    }

    #[test]
    fn test_completed_record_carries_local_uri() {
        let record = DownloadRecord::completed(&movie(), "/data/downloads/movie_603.mp4");
        assert!(record.is_completed());
        assert_eq!(record.progress, Some(100.0));
        assert_eq!(
            record.local_uri.as_deref(),
            Some("/data/downloads/movie_603.mp4")
        );
        assert!(record.error.is_none());
    }

    #[test]
    fn test_failed_record_has_no_local_uri() {
        let record = DownloadRecord::failed(&movie(), "connection reset");
        assert_eq!(record.status, DownloadStatus::Error);
        assert!(record.local_uri.is_none());
        assert_eq!(record.error.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_downloading_record_tracks_progress_only() {
        let record = DownloadRecord::downloading(&movie(), 42.5);
        assert_eq!(record.status, DownloadStatus::Downloading);
        assert_eq!(record.progress, Some(42.5));
        assert!(record.local_uri.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_persisted_shape_matches_app_layout() {
        let record = DownloadRecord::completed(&movie(), "/tmp/m.mp4");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"completed\""));
        assert!(json.contains("\"localUri\":\"/tmp/m.mp4\""));
    }

    #[test]
    fn test_status_roundtrips_lowercase() {
        let status: DownloadStatus = serde_json::from_str("\"downloading\"").unwrap();
        assert_eq!(status, DownloadStatus::Downloading);
        assert_eq!(
            serde_json::to_string(&DownloadStatus::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn test_created_at_is_rfc3339() {
        let record = DownloadRecord::failed(&movie(), "x");
        assert!(chrono::DateTime::parse_from_rfc3339(&record.created_at).is_ok());
    }
}
