//! HTTP client for making requests to the search provider

use crate::config::ProviderSettings;
use crate::error::{ConfigurationError, ProviderError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client wrapper bound to one provider base URL and credential
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    authorization: HeaderValue,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::with_settings(api_key, &ProviderSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(
        api_key: impl Into<String>,
        settings: &ProviderSettings,
    ) -> Result<Self, ConfigurationError> {
        settings.validate()?;

        let mut base_url = settings.parsed_base_url()?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let api_key: String = api_key.into();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| ConfigurationError::invalid("api_key", "not a valid header value"))?;
        authorization.set_sensitive(true);

        let timeout = settings.timeout()?;
        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent);

        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true);

        // Proxy settings
        let proxy_err =
            |e: reqwest::Error| ConfigurationError::invalid("provider.proxies", e.to_string());
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url).map_err(proxy_err)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http).map_err(proxy_err)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https).map_err(proxy_err)?);
            }
        }

        let client = builder
            .build()
            .map_err(|e| ConfigurationError::invalid("provider", e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            authorization,
            timeout,
        })
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ProviderError::Decode(format!("invalid endpoint `{}`: {}", path, e)))
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .headers(self.headers())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                text
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }
}

fn default_user_agent() -> String {
    format!("tavily-search-rs/{}", crate::VERSION)
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
