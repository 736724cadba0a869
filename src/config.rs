//! Provider configuration loaded by the host and read by the core.
//!
//! The host owns persistence and mutation of this struct; the core only
//! ever reads it. All consumers receive it by reference instead of going
//! through a process-global accessor, so concurrent calls stay independent.

use serde::{Deserialize, Serialize};

/// Default SubX API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://subx-api.duckdns.org";

/// User-facing provider configuration.
///
/// Every field carries a serde default so a partially persisted document
/// (e.g. from an older host version) deserializes to the documented
/// defaults instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Prefer the item's original title over its library title when
    /// building search queries.
    #[serde(default)]
    pub use_original_title: bool,

    /// Include the remote item's title in the result display name.
    #[serde(default = "default_true")]
    pub show_title_in_result: bool,

    /// Include the uploader name in the result display name.
    #[serde(default = "default_true")]
    pub show_uploader_in_result: bool,

    /// Base URL of the SubX API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token for the SubX API. Empty means unauthenticated.
    #[serde(default)]
    pub token: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            use_original_title: false,
            show_title_in_result: true,
            show_uploader_in_result: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: String::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
