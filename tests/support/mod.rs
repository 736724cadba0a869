//! Shared helpers for provider integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use subx_provider::{MediaLookup, ProviderConfig, ResolvedMediaItem, SubxProvider};

/// Catalog stub that resolves every path to one fixed item (or nothing).
pub struct StubCatalog {
    item: Option<ResolvedMediaItem>,
}

impl StubCatalog {
    /// A catalog that resolves every path to `item`.
    #[allow(dead_code)]
    pub fn resolving(item: ResolvedMediaItem) -> Self {
        Self { item: Some(item) }
    }

    /// A catalog that resolves nothing.
    pub fn unresolved() -> Self {
        Self { item: None }
    }
}

#[async_trait]
impl MediaLookup for StubCatalog {
    async fn resolve_by_path(
        &self,
        _path: &str,
        _exact_match_only: bool,
    ) -> Option<ResolvedMediaItem> {
        self.item.clone()
    }
}

/// Builds a provider over an explicit configuration and catalog stub.
pub fn provider_with(config: ProviderConfig, catalog: StubCatalog) -> SubxProvider {
    SubxProvider::new(config, Arc::new(catalog))
}

/// Builds a provider pointed at a mock server with default display flags.
pub fn provider_against(base_url: &str, token: &str, catalog: StubCatalog) -> SubxProvider {
    let config = ProviderConfig {
        api_base_url: base_url.to_string(),
        token: token.to_string(),
        ..ProviderConfig::default()
    };
    provider_with(config, catalog)
}
