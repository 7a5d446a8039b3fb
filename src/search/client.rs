//! Search client: calls the provider, limits results, renders output

use super::models::{SearchConfig, SearchMode};
use crate::config::{resolve_api_key_with, ProviderSettings, Settings};
use crate::error::{ConfigurationError, ProviderError, SearchError};
use crate::observe::{SearchObserver, TracingObserver};
use crate::provider::{ContextRequest, SearchProvider, SearchRequest, TavilyProvider};
use crate::render::{render, JsonStyle, MarkdownLayout, OutputFormat};
use crate::results::{limit_to_token_budget, CleanResult, ProviderResponse, SearchEnvelope};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, error};

/// Entry point for web searches.
///
/// Configuration is fixed at construction; the client can be shared and
/// called concurrently.
pub struct SearchClient {
    config: SearchConfig,
    provider: Arc<dyn SearchProvider>,
    observer: Arc<dyn SearchObserver>,
}

impl SearchClient {
    /// Create a client against the public Tavily API.
    ///
    /// Without an explicit key, `TAVILY_API_KEY` is read. Fails before any
    /// request if neither yields a key.
    pub fn new(api_key: Option<String>, config: SearchConfig) -> Result<Self, ConfigurationError> {
        Self::with_provider_settings(api_key, config, &ProviderSettings::default())
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigurationError> {
        let config = settings.search_config()?;
        Self::with_provider_settings(settings.provider.api_key.clone(), config, &settings.provider)
    }

    /// Create a client with custom transport settings
    pub fn with_provider_settings(
        api_key: Option<String>,
        config: SearchConfig,
        provider_settings: &ProviderSettings,
    ) -> Result<Self, ConfigurationError> {
        Self::with_key_lookup(api_key, config, provider_settings, |key| {
            std::env::var(key).ok()
        })
    }

    /// Like [`Self::with_provider_settings`], reading the fallback key
    /// through `lookup` instead of the process environment
    pub(crate) fn with_key_lookup<F>(
        api_key: Option<String>,
        config: SearchConfig,
        provider_settings: &ProviderSettings,
        lookup: F,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = resolve_api_key_with(api_key, lookup)?;
        config.validate()?;
        let provider = TavilyProvider::with_settings(api_key, provider_settings)?;
        Self::with_provider(Arc::new(provider), config)
    }

    /// Create a client around any provider
    pub fn with_provider(
        provider: Arc<dyn SearchProvider>,
        config: SearchConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the observer notified of every search attempt
    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search and render the provider response.
    ///
    /// JSON output is pretty-printed and carries every result the provider
    /// returned; markdown lists at most the configured result cap.
    pub async fn search(&self, query: &str) -> Result<String, SearchError> {
        let request = SearchRequest::new(query, self.config.depth)
            .include_answer(self.config.include_answer)
            .max_tokens(self.config.max_tokens);

        let response = self.call_search(query, &request).await?;

        let shown = match self.config.format {
            OutputFormat::Markdown => self.config.max_results,
            OutputFormat::Json => response.results.len(),
        };
        let results = response
            .results
            .iter()
            .take(shown)
            .map(CleanResult::from)
            .collect();
        let envelope = self.envelope(query, &response, results);

        let layout = self.layout_or(MarkdownLayout::list());
        Ok(render(&envelope, self.config.format, &layout, JsonStyle::Pretty)?)
    }

    /// Search with an optional result-count override and render results
    /// limited to the token budget.
    ///
    /// `None` uses the configured result cap.
    pub async fn search_detailed(
        &self,
        query: &str,
        max_results: Option<NonZeroUsize>,
    ) -> Result<String, SearchError> {
        let max_results = max_results
            .map(NonZeroUsize::get)
            .unwrap_or(self.config.max_results);

        let request = SearchRequest::new(query, self.config.depth)
            .include_answer(self.config.include_answer)
            .max_results(max_results);

        let response = self.call_search(query, &request).await?;

        let results = limit_to_token_budget(&response.results, self.config.max_tokens);
        debug!(
            "Kept {} of {} results within {} token budget",
            results.len(),
            response.results.len(),
            self.config.max_tokens
        );
        let envelope = self.envelope(query, &response, results);

        let layout = self.layout_or(MarkdownLayout::detailed());
        Ok(render(&envelope, self.config.format, &layout, JsonStyle::Compact)?)
    }

    /// Return the provider's context string verbatim
    pub async fn search_context(&self, query: &str) -> Result<String, SearchError> {
        let request = ContextRequest {
            query: query.to_string(),
            search_depth: self.config.depth,
            max_tokens: self.config.max_tokens,
            include_answer: self.config.include_answer,
        };

        match self.provider.get_search_context(&request).await {
            Ok(context) => {
                self.observer.record(query, &[], true);
                Ok(context)
            }
            Err(e) => Err(self.fail(query, e)),
        }
    }

    /// Dispatch on the configured search mode
    pub async fn run(&self, query: &str) -> Result<String, SearchError> {
        match self.config.mode {
            SearchMode::Detailed => self.search_detailed(query, None).await,
            SearchMode::Context => self.search_context(query).await,
        }
    }

    async fn call_search(
        &self,
        query: &str,
        request: &SearchRequest,
    ) -> Result<ProviderResponse, SearchError> {
        match self.provider.search(request).await {
            Ok(response) => {
                self.observer.record(query, &response.results, true);
                Ok(response)
            }
            Err(e) => Err(self.fail(query, e)),
        }
    }

    fn fail(&self, query: &str, err: ProviderError) -> SearchError {
        error!("{} search for '{}' failed: {}", self.provider.name(), query, err);
        self.observer.record(query, &[], false);
        SearchError::Provider(err)
    }

    fn envelope(
        &self,
        query: &str,
        response: &ProviderResponse,
        results: Vec<CleanResult>,
    ) -> SearchEnvelope {
        let answer = if self.config.include_answer {
            response.non_empty_answer().map(str::to_string)
        } else {
            None
        };

        SearchEnvelope {
            query: query.to_string(),
            answer,
            results,
        }
    }

    fn layout_or(&self, default: MarkdownLayout) -> MarkdownLayout {
        self.config
            .markdown_layout
            .map(|kind| kind.layout())
            .unwrap_or(default)
    }
}
