//! Host-facing media types and the library-catalog lookup seam.
//!
//! The host resolves a media path to structured metadata through its own
//! catalog; this module only defines the shapes crossing that boundary:
//!
//! - [`SearchRequest`] - what the host hands to a subtitle search
//! - [`ResolvedMediaItem`] - what the catalog lookup returns, when it can
//! - [`MediaLookup`] - async trait the host implements for the lookup

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Kind of video content a subtitle search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// A standalone movie.
    Movie,
    /// An episode of a series.
    Episode,
}

/// Subtitle search request constructed by the host.
///
/// `media_path` is authoritative; the remaining fields mirror what the
/// host already knows about the item and serve as a fallback when the
/// catalog cannot resolve the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Path of the media file the subtitles are for.
    pub media_path: String,
    /// Requested subtitle language as a 3-letter ISO-639-2 code.
    pub language: String,
    /// Whether the item is a movie or an episode.
    pub content_type: ContentType,
    /// Series name, for episodes.
    pub series_name: Option<String>,
    /// Item name, for movies.
    pub name: Option<String>,
    /// Season number, for episodes.
    pub parent_index_number: Option<u32>,
    /// Episode number within the season.
    pub index_number: Option<u32>,
    /// Production year, for movies.
    pub production_year: Option<i32>,
}

/// Media item as resolved by the host's library catalog.
///
/// Either shape may carry provider IDs usable as exact-match hints on the
/// remote search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMediaItem {
    /// An episode, with series-level metadata attached.
    Episode {
        /// Name of the series the episode belongs to.
        series_name: String,
        /// Original (untranslated) series title, when known.
        original_title: Option<String>,
        /// Season number.
        season_index: u32,
        /// Episode number within the season.
        episode_index: u32,
        /// IMDb ID of the series.
        series_imdb_id: Option<String>,
        /// TMDb ID of the series.
        series_tmdb_id: Option<String>,
    },
    /// A movie.
    Movie {
        /// Library title of the movie.
        name: String,
        /// Original (untranslated) title, when known.
        original_title: Option<String>,
        /// Production year.
        production_year: Option<i32>,
        /// IMDb ID of the movie.
        imdb_id: Option<String>,
        /// TMDb ID of the movie.
        tmdb_id: Option<String>,
    },
}

/// Library-catalog lookup implemented by the host.
///
/// Object-safe so the provider can hold a `dyn MediaLookup` without
/// knowing the host's catalog implementation.
#[async_trait]
pub trait MediaLookup: Send + Sync {
    /// Resolves a media file path to structured metadata.
    ///
    /// Returns `None` when the path is unknown to the catalog; callers
    /// must tolerate that and fall back to request-supplied fields.
    async fn resolve_by_path(&self, path: &str, exact_match_only: bool)
    -> Option<ResolvedMediaItem>;
}
