// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Video platform integration (YouTube Data API).

pub mod youtube;

pub use youtube::{VideoInfo, VideoSearchResults, YouTubeClient, YouTubeConfig};
