//! HTTP client for the external web search provider.

use async_trait::async_trait;
use serde::Deserialize;

use super::{ProviderError, SearchItem, SearchProvider};

/// Client for a Custom Search style endpoint.
///
/// Issues `GET <endpoint>?key=<credential>&cx=<engine id>&q=<query>` and
/// decodes the `items` array of the response. The query string is built by
/// the HTTP client's parameter encoder, so reserved characters in the query
/// cannot corrupt the request. No timeout is configured beyond the transport
/// defaults and failures are not retried.
pub struct CustomSearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

#[derive(Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    items: Vec<SearchItem>,
}

impl CustomSearchClient {
    /// Create a new search client.
    ///
    /// # Arguments
    /// * `endpoint` - Base URL of the search endpoint
    /// * `api_key` - API credential (the `key` parameter)
    /// * `engine_id` - Search engine identifier (the `cx` parameter)
    pub fn new(endpoint: String, api_key: String, engine_id: String) -> Self {
        // Ensure endpoint doesn't have trailing slash
        let endpoint = endpoint.trim_end_matches('/').to_string();

        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            engine_id,
        }
    }

    /// Get the endpoint URL this client queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchProvider for CustomSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchItem>, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        // The provider contract requires an exact 200; anything else is a
        // hard failure for this invocation.
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ProviderError::UpstreamStatus(status));
        }

        let body: SearchResponseBody = response.json().await.map_err(ProviderError::Decode)?;
        Ok(body.items)
    }
}
