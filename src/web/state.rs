//! Application state shared across handlers

use crate::config::Settings;
use crate::functions::FunctionRegistry;
use crate::observe::{ObserverSet, SearchMetrics, TracingObserver};
use crate::search::SearchClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Registered functions
    pub functions: Arc<FunctionRegistry>,
    /// Search metrics
    pub metrics: Arc<SearchMetrics>,
}

impl AppState {
    /// Create new application state from settings
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let metrics = Arc::new(SearchMetrics::new());
        let observers = ObserverSet::new()
            .with(Arc::new(TracingObserver))
            .with(metrics.clone());

        let client = SearchClient::from_settings(&settings)?.with_observer(Arc::new(observers));
        Ok(Self::with_client(settings, Arc::new(client), metrics))
    }

    /// Create state around an existing client
    pub fn with_client(
        settings: Settings,
        client: Arc<SearchClient>,
        metrics: Arc<SearchMetrics>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            functions: Arc::new(FunctionRegistry::with_search_functions(client)),
            metrics,
        }
    }
}
