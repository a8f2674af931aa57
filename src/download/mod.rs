// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Offline download lifecycle: records, persistence, transfer, management.

pub mod cancel;
pub mod manager;
pub mod record;
pub mod store;
pub mod transfer;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use manager::{DownloadManager, DownloadManagerConfig};
pub use record::{CatalogEntry, DownloadRecord, DownloadStatus};
pub use store::DownloadStore;
