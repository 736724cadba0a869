//! Wire types for the SubX search API.
//!
//! Field names match the JSON the API sends; optional fields are lenient
//! because the upstream feed omits them freely.

use serde::Deserialize;

/// Envelope returned by `GET /subtitles/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Result records in the order the API ranked them.
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One raw search result record.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// Numeric subtitle ID, also the download key.
    pub id: i64,
    /// "movie" or "episode".
    #[serde(default)]
    pub video_type: Option<String>,
    /// Release title the subtitle was posted under.
    #[serde(default)]
    pub title: String,
    /// Season number, for episode subtitles.
    #[serde(default)]
    pub season: Option<u32>,
    /// Episode number, for episode subtitles.
    #[serde(default)]
    pub episode: Option<u32>,
    /// IMDb ID of the matched item.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Uploader-written description of the release.
    #[serde(default)]
    pub description: Option<String>,
    /// Download count reported by the API.
    #[serde(default)]
    pub downloads: i64,
    /// Display name of the uploader.
    #[serde(default)]
    pub uploader_name: String,
    /// Upload timestamp as sent by the API.
    #[serde(default)]
    pub posted_at: Option<String>,
}
