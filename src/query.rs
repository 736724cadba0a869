//! Search-query derivation from media metadata.
//!
//! Two strategies exist side by side and the orchestrator composes them:
//! [`build_query`] derives the query from a catalog-resolved item (and can
//! pass provider IDs through as exact-match hints), while
//! [`build_query_from_request`] works purely from the fields the host put
//! on the request and is used when catalog resolution fails. Keeping both
//! as named functions keeps the eventual consolidation a one-line change
//! at the call site.

use crate::config::ProviderConfig;
use crate::media::{ContentType, ResolvedMediaItem, SearchRequest};

/// Derived search query for the remote API. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text query, e.g. `"Dexter: New Blood S01E01"`.
    pub text: String,
    /// IMDb ID hint, when the catalog knows it.
    pub imdb_id: Option<String>,
    /// TMDb ID hint, when the catalog knows it.
    pub tmdb_id: Option<String>,
}

/// Builds a search query from a catalog-resolved media item.
///
/// Episodes render as `"{title} S{season:02}E{episode:02}"`, movies as
/// `"{title} {year}"`. The original title is preferred only when
/// `config.use_original_title` is set and the item actually carries a
/// non-blank original title.
#[must_use]
pub fn build_query(item: &ResolvedMediaItem, config: &ProviderConfig) -> SearchQuery {
    match item {
        ResolvedMediaItem::Episode {
            series_name,
            original_title,
            season_index,
            episode_index,
            series_imdb_id,
            series_tmdb_id,
        } => {
            let title = pick_title(series_name, original_title.as_deref(), config);
            SearchQuery {
                text: format!("{title} S{season_index:02}E{episode_index:02}"),
                imdb_id: series_imdb_id.clone(),
                tmdb_id: series_tmdb_id.clone(),
            }
        }
        ResolvedMediaItem::Movie {
            name,
            original_title,
            production_year,
            imdb_id,
            tmdb_id,
        } => {
            let title = pick_title(name, original_title.as_deref(), config);
            let text = match production_year {
                Some(year) => format!("{title} {year}"),
                None => title.to_string(),
            };
            SearchQuery {
                text,
                imdb_id: imdb_id.clone(),
                tmdb_id: tmdb_id.clone(),
            }
        }
    }
}

/// Builds a search query purely from request-supplied fields.
///
/// Used when the catalog cannot resolve the media path. No provider IDs
/// are available on this path. Returns `None` when the request lacks the
/// fields its content type needs.
#[must_use]
pub fn build_query_from_request(request: &SearchRequest) -> Option<SearchQuery> {
    let text = match request.content_type {
        ContentType::Episode => {
            let series = request.series_name.as_deref().filter(|s| !s.trim().is_empty())?;
            let season = request.parent_index_number?;
            let episode = request.index_number?;
            format!("{series} S{season:02}E{episode:02}")
        }
        ContentType::Movie => {
            let name = request.name.as_deref().filter(|s| !s.trim().is_empty())?;
            match request.production_year {
                Some(year) => format!("{name} {year}"),
                None => name.to_string(),
            }
        }
    };

    Some(SearchQuery {
        text,
        imdb_id: None,
        tmdb_id: None,
    })
}

fn pick_title<'a>(
    library_title: &'a str,
    original_title: Option<&'a str>,
    config: &ProviderConfig,
) -> &'a str {
    if config.use_original_title
        && let Some(original) = original_title
        && !original.trim().is_empty()
    {
        return original;
    }
    library_title
}
