//! Tavily search provider implementation

use super::traits::*;
use crate::config::ProviderSettings;
use crate::error::{ConfigurationError, ProviderError};
use crate::network::HttpClient;
use crate::results::{take_within_budget, ProviderResponse};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Results requested when building a context string
const CONTEXT_MAX_RESULTS: usize = 5;

/// One `{url, content}` entry of a context string
#[derive(Debug, Serialize)]
struct ContextSource<'a> {
    url: &'a str,
    content: &'a str,
}

/// Tavily web search API
pub struct TavilyProvider {
    client: HttpClient,
}

impl TavilyProvider {
    /// Create a provider against the public API
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self::with_client(HttpClient::new(api_key)?))
    }

    /// Create a provider with custom transport settings
    pub fn with_settings(
        api_key: impl Into<String>,
        settings: &ProviderSettings,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::with_client(HttpClient::with_settings(api_key, settings)?))
    }

    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, request: &SearchRequest) -> Result<ProviderResponse, ProviderError> {
        debug!(
            "Tavily search '{}' (depth={}, base={})",
            request.query,
            request.search_depth,
            self.client.base_url()
        );
        self.client.post_json("search", request).await
    }

    async fn get_search_context(&self, request: &ContextRequest) -> Result<String, ProviderError> {
        let search = SearchRequest::new(request.query.clone(), request.search_depth)
            .include_answer(request.include_answer)
            .max_results(CONTEXT_MAX_RESULTS);

        let response = self.search(&search).await?;

        let sources = response.results.iter().map(|r| ContextSource {
            url: &r.url,
            content: &r.content,
        });
        let context = take_within_budget(sources, request.max_tokens);

        serde_json::to_string(&context).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
