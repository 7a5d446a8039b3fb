//! Web search functions backed by a [`SearchClient`]

use super::traits::*;
use crate::search::SearchClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Arguments accepted by the query-only functions: `{"query": ".."}` or a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QueryArgs {
    Bare(String),
    Object { query: String },
}

impl QueryArgs {
    fn into_query(self) -> String {
        match self {
            Self::Bare(query) | Self::Object { query } => query,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailedArgs {
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
}

fn query_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query to use."
            }
        },
        "required": ["query"]
    })
}

/// `web_search`: plain search rendered in the configured format
pub struct WebSearch {
    client: Arc<SearchClient>,
}

impl WebSearch {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AgentFunction for WebSearch {
    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: "web_search".to_string(),
            description: "Search for information on the web with Tavily API".to_string(),
            parameters: query_schema(),
        }
    }

    async fn invoke(&self, arguments: Value) -> Result<String, FunctionError> {
        let query = parse_arguments::<QueryArgs>(arguments)?.into_query();
        Ok(self.client.search(&query).await?)
    }
}

/// `web_search_detailed`: structured results limited to the token budget
pub struct WebSearchDetailed {
    client: Arc<SearchClient>,
}

impl WebSearchDetailed {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AgentFunction for WebSearchDetailed {
    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: "web_search_detailed".to_string(),
            description: "Search the web with detailed, structured results".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query to use."
                    },
                    "max_results": {
                        "type": "integer",
                        "minimum": 1,
                        "description": format!(
                            "Maximum number of results (defaults to {})",
                            self.client.config().max_results
                        )
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn invoke(&self, arguments: Value) -> Result<String, FunctionError> {
        let args: DetailedArgs = parse_arguments(arguments)?;
        let max_results = match args.max_results {
            None => None,
            Some(n) => Some(NonZeroUsize::new(n).ok_or_else(|| {
                FunctionError::InvalidArguments("max_results must be at least 1".to_string())
            })?),
        };
        Ok(self.client.search_detailed(&args.query, max_results).await?)
    }
}

/// `web_search_context`: raw provider context string
pub struct WebSearchContext {
    client: Arc<SearchClient>,
}

impl WebSearchContext {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AgentFunction for WebSearchContext {
    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: "web_search_context".to_string(),
            description: "Search the web and return raw context information".to_string(),
            parameters: query_schema(),
        }
    }

    async fn invoke(&self, arguments: Value) -> Result<String, FunctionError> {
        let query = parse_arguments::<QueryArgs>(arguments)?.into_query();
        Ok(self.client.search_context(&query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderSettings;
    use crate::render::OutputFormat;
    use crate::search::SearchConfig;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> Arc<SearchClient> {
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"title": "Tokio", "url": "https://tokio.rs", "content": "An async runtime.", "score": 0.9}
                ]
            })))
            .mount(server)
            .await;
        client_at(server)
    }

    fn client_at(server: &MockServer) -> Arc<SearchClient> {
        let settings = ProviderSettings {
            base_url: server.uri(),
            ..Default::default()
        };
        let config = SearchConfig::default().with_format(OutputFormat::Json);
        Arc::new(
            SearchClient::with_provider_settings(Some("tvly-test".into()), config, &settings)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_web_search_accepts_object_and_bare_string() {
        let server = MockServer::start().await;
        let function = WebSearch::new(client_for(&server).await);

        let from_object = function.invoke(json!({"query": "tokio"})).await.unwrap();
        let from_string = function.invoke(json!("tokio")).await.unwrap();
        assert_eq!(from_object, from_string);
        assert!(from_object.contains("https://tokio.rs"));
    }

    #[tokio::test]
    async fn test_detailed_rejects_zero_max_results() {
        let server = MockServer::start().await;
        let function = WebSearchDetailed::new(client_for(&server).await);

        let err = function
            .invoke(json!({"query": "tokio", "max_results": 0}))
            .await
            .unwrap_err();
        assert!(matches!(err, FunctionError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_detailed_forwards_max_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"max_results": 2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;
        let function = WebSearchDetailed::new(client_at(&server));

        let out = function
            .invoke(json!({"query": "tokio", "max_results": 2}))
            .await
            .unwrap();
        assert_eq!(out, r#"{"query":"tokio","results":[]}"#);
    }

    #[tokio::test]
    async fn test_provider_failure_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let settings = ProviderSettings {
            base_url: server.uri(),
            ..Default::default()
        };
        let client = Arc::new(
            SearchClient::with_provider_settings(
                Some("tvly-test".into()),
                SearchConfig::default(),
                &settings,
            )
            .unwrap(),
        );

        let err = WebSearch::new(client)
            .invoke(json!({"query": "tokio"}))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Search failed: "));
    }

    #[test]
    fn test_declarations() {
        let client = Arc::new(
            SearchClient::with_provider_settings(
                Some("tvly-test".into()),
                SearchConfig::default(),
                &ProviderSettings::default(),
            )
            .unwrap(),
        );
        let decl = WebSearch::new(client.clone()).declaration();
        assert_eq!(decl.name, "web_search");
        assert_eq!(decl.parameters["required"], json!(["query"]));

        let detailed = WebSearchDetailed::new(client).declaration();
        assert_eq!(detailed.parameters["properties"]["max_results"]["minimum"], 1);
    }
}
