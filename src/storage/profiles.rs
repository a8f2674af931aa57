// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Viewer profile storage
//!
//! The profile list is one persisted JSON array under the `profiles` key.
//! Every mutation is a read-modify-write of the whole list, serialized
//! behind one async lock so two interleaved mutations cannot drop each
//! other's updates.

use crate::error::Result;
use crate::storage::backend::{read_json_soft, write_json, StorageBackend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const PROFILES_KEY: &str = "profiles";

/// A locally-stored viewer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Avatar tile color, as the hex string the UI renders
    pub color: String,
    #[serde(rename = "isKids")]
    pub is_kids: bool,
}

/// Fields supplied by the UI when creating a profile; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub color: String,
    pub is_kids: bool,
}

/// CRUD over the persisted profile list.
pub struct ProfileStore {
    backend: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl ProfileStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// List all profiles. Missing or corrupt data yields an empty list.
    pub fn list(&self) -> Vec<Profile> {
        read_json_soft(self.backend.as_ref(), PROFILES_KEY).unwrap_or_default()
    }

    /// Look up a profile by id.
    pub fn get(&self, id: &str) -> Option<Profile> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Add a profile, assigning it a fresh id. Returns the stored profile.
    pub async fn add(&self, new: NewProfile) -> Result<Profile> {
        let profile = Profile {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            color: new.color,
            is_kids: new.is_kids,
        };

        let _guard = self.write_lock.lock().await;
        let mut profiles = self.list();
        profiles.push(profile.clone());
        write_json(self.backend.as_ref(), PROFILES_KEY, &profiles)?;
        Ok(profile)
    }

    /// Replace the stored profile with the same id. Unknown ids are ignored,
    /// matching the app's existing behavior.
    pub async fn update(&self, profile: &Profile) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut profiles = self.list();
        for existing in profiles.iter_mut() {
            if existing.id == profile.id {
                *existing = profile.clone();
            }
        }
        write_json(self.backend.as_ref(), PROFILES_KEY, &profiles)
    }

    /// Remove the profile with the given id, if present.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut profiles = self.list();
        profiles.retain(|p| p.id != id);
        write_json(self.backend.as_ref(), PROFILES_KEY, &profiles)
    }
}
