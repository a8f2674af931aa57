// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Key-value persistence
//!
//! Small JSON blobs keyed by name, matching the storage layout the mobile
//! app already uses on device. The backend is injected so tests (and other
//! platforms) can substitute an in-memory implementation.

pub mod backend;
pub mod profiles;
pub mod settings;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use profiles::{NewProfile, Profile, ProfileStore};
pub use settings::{NotificationSettings, SettingsStore};
