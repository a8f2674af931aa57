// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Movie catalog: TMDB client, data model, and display formatting.

pub mod client;
pub mod format;
pub mod types;

pub use client::{Category, TmdbClient, TmdbConfig};
pub use types::{Cast, Credits, Crew, Genre, Movie, MovieDetails, SearchPage, Video};
