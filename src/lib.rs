// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Native core library for the Streamio mobile client.
//!
//! The UI layer (screens, navigation, playback) lives in the mobile app;
//! this crate provides everything underneath it:
//!
//! - [`catalog`] - TMDB catalog client and display formatting helpers
//! - [`video`] - YouTube metadata client for trailers
//! - [`download`] - offline download lifecycle: directory setup, resumable
//!   transfers with progress reporting, the persisted record store, deletion
//! - [`storage`] - key-value persistence (viewer profiles, notification
//!   settings) behind a swappable backend
//! - [`notify`] - settings-gated local notification dispatch
//!
//! No server, CLI, or wire protocol is exposed; everything here is a plain
//! library surface consumed by the app.

pub mod catalog;
pub mod download;
pub mod error;
pub mod notify;
pub mod storage;
pub mod video;

pub use error::{Result, StreamioError};
