//! Function registry for exposing functions to a host

use super::traits::{AgentFunction, FunctionDeclaration, FunctionError};
use super::web_search::{WebSearch, WebSearchContext, WebSearchDetailed};
use crate::search::SearchClient;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of all exposed functions
pub struct FunctionRegistry {
    functions: Vec<Arc<dyn AgentFunction>>,
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// Create a registry with the three web search functions
    pub fn with_search_functions(client: Arc<SearchClient>) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(WebSearch::new(client.clone())));
        registry.register(Arc::new(WebSearchDetailed::new(client.clone())));
        registry.register(Arc::new(WebSearchContext::new(client)));

        info!("Registered {} search functions", registry.len());
        registry
    }

    /// Register a function; a later registration replaces one with the same name
    pub fn register(&mut self, function: Arc<dyn AgentFunction>) {
        let name = function.name();
        self.functions.retain(|f| f.name() != name);
        self.functions.push(function);
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn AgentFunction>> {
        self.functions.iter().find(|f| f.name() == name)
    }

    /// Names of all registered functions
    pub fn names(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name()).collect()
    }

    /// Declarations of all registered functions
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.functions.iter().map(|f| f.declaration()).collect()
    }

    /// Invoke a function by name
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<String, FunctionError> {
        let function = self
            .get(name)
            .ok_or_else(|| FunctionError::NotFound(name.to_string()))?;
        debug!("Invoking function {}", name);
        function.invoke(arguments).await
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo(&'static str);

    #[async_trait]
    impl AgentFunction for Echo {
        fn declaration(&self) -> FunctionDeclaration {
            FunctionDeclaration {
                name: "echo".to_string(),
                description: self.0.to_string(),
                parameters: json!({"type": "object"}),
            }
        }

        async fn invoke(&self, arguments: Value) -> Result<String, FunctionError> {
            Ok(format!("{}:{}", self.0, arguments))
        }
    }

    #[tokio::test]
    async fn test_invoke_by_name() {
        let mut registry = FunctionRegistry::new();
        assert!(registry.is_empty());
        registry.register(Arc::new(Echo("one")));

        let out = registry.invoke("echo", json!(1)).await.unwrap();
        assert_eq!(out, "one:1");

        let err = registry.invoke("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, FunctionError::NotFound(name) if name == "missing"));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = FunctionRegistry::new();
        registry.register(Arc::new(Echo("one")));
        registry.register(Arc::new(Echo("two")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.declarations()[0].description, "two");
    }

    #[test]
    fn test_search_functions_registered() {
        let client = SearchClient::with_provider_settings(
            Some("tvly-test".into()),
            Default::default(),
            &Default::default(),
        )
        .unwrap();
        let registry = FunctionRegistry::with_search_functions(Arc::new(client));
        assert_eq!(
            registry.names(),
            vec!["web_search", "web_search_detailed", "web_search_context"]
        );
    }
}
