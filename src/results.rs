//! Normalization of raw API records into the provider-agnostic result model.

use crate::api::SearchResponse;
use crate::config::ProviderConfig;

/// Three-letter ISO-639-2 code the provider serves, regardless of request.
pub const RESULT_LANGUAGE_CODE: &str = "ESP";

/// Two-letter code declared on downloaded subtitles.
pub const SUBTITLE_LANGUAGE_CODE: &str = "ES";

/// Subtitle format this provider serves.
pub const SUBTITLE_FORMAT: &str = "srt";

/// One normalized search result, as handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleResult {
    /// Stringified remote subtitle ID; the key for a later download.
    pub id: String,
    /// Name shown to the user, built per the display configuration.
    pub display_name: String,
    /// Uploader-written description, present only when a display flag is on.
    pub comment: Option<String>,
    /// Always [`RESULT_LANGUAGE_CODE`] for this provider.
    pub language_code: String,
    /// Download count reported by the API.
    pub download_count: i64,
    /// Uploader name.
    pub author: String,
    /// Name of the provider that produced this result.
    pub provider_name: String,
    /// Always [`SUBTITLE_FORMAT`].
    pub format: String,
}

/// Terminal artifact of the download path.
///
/// `stream` may be empty when every download attempt failed or the
/// archive held no usable entry; the metadata fields are populated either
/// way, so callers must check the stream rather than rely on an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleResponse {
    /// Always [`SUBTITLE_FORMAT`].
    pub format: String,
    /// Never set by this provider.
    pub is_forced: bool,
    /// Always [`SUBTITLE_LANGUAGE_CODE`].
    pub language_code: String,
    /// Extracted subtitle bytes, possibly empty.
    pub stream: Vec<u8>,
}

impl SubtitleResponse {
    /// Builds the fixed-metadata response around whatever bytes were obtained.
    #[must_use]
    pub fn with_stream(stream: Vec<u8>) -> Self {
        Self {
            format: SUBTITLE_FORMAT.to_string(),
            is_forced: false,
            language_code: SUBTITLE_LANGUAGE_CODE.to_string(),
            stream,
        }
    }
}

/// Maps a raw search envelope into normalized results, preserving order.
///
/// Display-name rules, in priority order:
/// 1. Both display flags off: the raw description is the display name
///    and no comment is set.
/// 2. Otherwise the name is assembled from the enabled parts: the item
///    title, then `"Uploader: {name}"`, joined with `" | "` only when
///    both parts are present. The description moves to the comment.
#[must_use]
pub fn normalize(
    response: SearchResponse,
    config: &ProviderConfig,
    provider_name: &str,
) -> Vec<SubtitleResult> {
    response
        .items
        .into_iter()
        .map(|item| {
            let description = item.description.unwrap_or_default();

            let (display_name, comment) =
                if config.show_title_in_result || config.show_uploader_in_result {
                    let mut name = String::new();
                    if config.show_title_in_result {
                        name.push_str(&item.title);
                    }
                    if config.show_uploader_in_result {
                        if config.show_title_in_result {
                            name.push_str(" | ");
                        }
                        name.push_str("Uploader: ");
                        name.push_str(&item.uploader_name);
                    }
                    (name, Some(description))
                } else {
                    (description, None)
                };

            SubtitleResult {
                id: item.id.to_string(),
                display_name,
                comment,
                language_code: RESULT_LANGUAGE_CODE.to_string(),
                download_count: item.downloads,
                author: item.uploader_name,
                provider_name: provider_name.to_string(),
                format: SUBTITLE_FORMAT.to_string(),
            }
        })
        .collect()
}
