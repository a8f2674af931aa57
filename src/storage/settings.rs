// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Notification settings storage
//!
//! Typed read/write over the `notification_settings` key. A missing or
//! corrupt blob falls back to the defaults (everything enabled) so the
//! settings screen always has something to render.

use crate::error::Result;
use crate::storage::backend::{read_json_soft, write_json, StorageBackend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SETTINGS_KEY: &str = "notification_settings";

/// Per-category notification toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// New catalog content announcements
    pub new_content: bool,
    /// Personalized recommendations
    pub recommendations: bool,
    /// App update announcements
    pub updates: bool,
    /// Download completion/failure notices
    pub downloads: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            new_content: true,
            recommendations: true,
            updates: true,
            downloads: true,
        }
    }
}

/// Typed accessor for [`NotificationSettings`] over a storage backend.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn StorageBackend>,
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Load settings, substituting defaults for a missing or corrupt blob.
    pub fn get(&self) -> NotificationSettings {
        read_json_soft(self.backend.as_ref(), SETTINGS_KEY).unwrap_or_default()
    }

    /// Persist the full settings blob.
    pub fn save(&self, settings: &NotificationSettings) -> Result<()> {
        write_json(self.backend.as_ref(), SETTINGS_KEY, settings)
    }
}
