mod custom_search;

pub use custom_search::CustomSearchClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One web search result as returned by the provider.
///
/// The description travels under the wire name `snippet`, both in the
/// provider's response and in this server's own output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    #[serde(rename = "snippet")]
    pub description: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("search provider responded with status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("failed to decode search response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs one search and returns the provider's results in their original order.
    async fn search(&self, query: &str) -> Result<Vec<SearchItem>, ProviderError>;
}
