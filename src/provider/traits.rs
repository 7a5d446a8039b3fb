//! Provider traits and request types

use crate::error::ProviderError;
use crate::results::ProviderResponse;
use crate::search::SearchDepth;
use async_trait::async_trait;
use serde::Serialize;

/// Parameters of a provider search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Search query string
    pub query: String,
    /// Search depth
    pub search_depth: SearchDepth,
    /// Ask for a generated answer
    pub include_answer: bool,
    /// Serialized-size budget hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    /// Result count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, search_depth: SearchDepth) -> Self {
        Self {
            query: query.into(),
            search_depth,
            include_answer: false,
            max_tokens: None,
            max_results: None,
        }
    }

    pub fn include_answer(mut self, include: bool) -> Self {
        self.include_answer = include;
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

/// Parameters of a provider context call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRequest {
    pub query: String,
    pub search_depth: SearchDepth,
    /// Budget for the returned context string
    pub max_tokens: usize,
    pub include_answer: bool,
}

/// A remote web-search provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Run a search and return the structured response
    async fn search(&self, request: &SearchRequest) -> Result<ProviderResponse, ProviderError>;

    /// Run a search and return a context string ready to hand to a model
    async fn get_search_context(&self, request: &ContextRequest) -> Result<String, ProviderError>;
}
