//! HTTP request handlers

use super::state::AppState;
use crate::functions::FunctionError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Successful invocation response
#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    pub name: String,
    pub result: String,
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        let status = match &self {
            FunctionError::NotFound(_) => StatusCode::NOT_FOUND,
            FunctionError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            FunctionError::Search(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// List function declarations
pub async fn list_functions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.functions.declarations())
}

/// Invoke a function with a JSON arguments body
pub async fn invoke_function(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(arguments): Json<Value>,
) -> Result<Json<InvokeResponse>, FunctionError> {
    let result = state.functions.invoke(&name, arguments).await.map_err(|e| {
        tracing::warn!("Function {} failed: {}", name, e);
        e
    })?;
    Ok(Json(InvokeResponse { name, result }))
}

/// Search statistics
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.stats())
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let search = &state.settings.search;
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "functions": state.functions.names(),
        "search": {
            "mode": search.mode,
            "depth": search.depth,
            "format": search.format,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::super::{create_router, AppState};
    use crate::config::Settings;
    use crate::observe::SearchMetrics;
    use crate::search::SearchClient;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state_for(server: &MockServer) -> AppState {
        let mut settings = Settings::default();
        settings.provider.base_url = server.uri();
        settings.provider.api_key = Some("tvly-test".to_string());

        let metrics = Arc::new(SearchMetrics::new());
        let client = SearchClient::from_settings(&settings)
            .unwrap()
            .with_observer(metrics.clone());
        AppState::with_client(settings, Arc::new(client), metrics)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_listing() {
        let server = MockServer::start().await;
        let app = create_router(state_for(&server));

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let health = body_json(response).await;
        assert_eq!(health["status"], "ok");
        assert_eq!(health["search"]["format"], "markdown");

        let response = app
            .oneshot(Request::get("/functions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let functions = body_json(response).await;
        assert_eq!(functions.as_array().unwrap().len(), 3);
        assert_eq!(functions[0]["name"], "web_search");
    }

    #[tokio::test]
    async fn test_invoke_web_search() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "Ferris.",
                "results": [{"title": "Ferris", "url": "https://rustacean.net", "content": "The crab."}]
            })))
            .mount(&server)
            .await;
        let app = create_router(state_for(&server));

        let response = app
            .clone()
            .oneshot(post("/functions/web_search", json!({"query": "rust mascot"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "web_search");
        let result = body["result"].as_str().unwrap();
        assert!(result.contains("## Answer\n\nFerris."));
        assert!(result.contains("1. **[Ferris](https://rustacean.net)**"));

        let response = app
            .oneshot(Request::get("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let stats = body_json(response).await;
        assert_eq!(stats["total_searches"], 1);
        assert_eq!(stats["recent"][0]["query"], "rust mascot");
    }

    #[tokio::test]
    async fn test_invoke_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;
        let app = create_router(state_for(&server));

        let response = app
            .clone()
            .oneshot(post("/functions/nope", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(post(
                "/functions/web_search_detailed",
                json!({"query": "x", "max_results": 0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post("/functions/web_search", json!({"query": "x"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Search failed: "));
    }
}
