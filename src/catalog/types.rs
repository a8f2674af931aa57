// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Catalog data model
//!
//! Mirrors the TMDB v3 response shapes the app consumes. Field names stay
//! snake_case to match the wire format, so these derive straight through
//! serde with no rename ceremony.

use serde::{Deserialize, Serialize};

/// Genre ids used by the browse rows.
pub mod genre_ids {
    pub const ACTION: u64 = 28;
    pub const ANIMATION: u64 = 16;
    pub const COMEDY: u64 = 35;
    pub const DOCUMENTARY: u64 = 99;
    pub const DRAMA: u64 = 18;
    pub const HORROR: u64 = 27;
    pub const SCIFI: u64 = 878;
}

/// A catalog movie as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub english_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// Full movie details from `/movie/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Runtime in minutes; zero when TMDB has no data yet
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<Cast>,
    #[serde(default)]
    pub crew: Vec<Crew>,
}

/// A trailer/teaser/clip entry from `/movie/{id}/videos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    /// Site-specific video key (for YouTube, the watch id)
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    pub fn is_trailer(&self) -> bool {
        self.video_type == "Trailer"
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}
