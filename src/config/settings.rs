//! Settings structures for Tavily-Search-RS configuration

use crate::error::ConfigurationError;
use crate::render::{LayoutKind, OutputFormat};
use crate::search::{SearchConfig, SearchDepth, SearchMode};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main settings structure, loadable from `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub search: SearchSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (TAVILY_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Merge with values from an arbitrary lookup; unparsable values are ignored
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(crate::API_KEY_ENV) {
            if !val.trim().is_empty() {
                self.provider.api_key = Some(val);
            }
        }
        if let Some(val) = lookup("TAVILY_BASE_URL") {
            self.provider.base_url = val;
        }
        if let Some(val) = lookup("TAVILY_SEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("TAVILY_SEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("TAVILY_SEARCH_FORMAT") {
            if let Ok(format) = val.parse() {
                self.search.format = format;
            }
        }
        if let Some(val) = lookup("TAVILY_SEARCH_DEPTH") {
            if let Ok(depth) = val.parse() {
                self.search.depth = depth;
            }
        }
        if let Some(val) = lookup("TAVILY_SEARCH_MAX_TOKENS") {
            if let Ok(max_tokens) = val.parse() {
                self.search.max_tokens = max_tokens;
            }
        }
        if let Some(val) = lookup("TAVILY_SEARCH_MAX_RESULTS") {
            if let Ok(max_results) = val.parse() {
                self.search.max_results = max_results;
            }
        }
        if let Some(val) = lookup("TAVILY_SEARCH_INCLUDE_ANSWER") {
            if let Ok(include) = val.parse() {
                self.search.include_answer = include;
            }
        }
    }

    /// Build the validated, immutable search configuration
    pub fn search_config(&self) -> Result<SearchConfig, ConfigurationError> {
        let config = SearchConfig {
            mode: self.search.mode,
            depth: self.search.depth,
            format: self.search.format,
            max_tokens: self.search.max_tokens,
            max_results: self.search.max_results,
            include_answer: self.search.include_answer,
            markdown_layout: self.search.markdown_layout,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Remote provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key; falls back to TAVILY_API_KEY when unset
    pub api_key: Option<String>,
    /// Base URL of the Tavily REST API
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            user_agent: None,
            proxies: ProxySettings::default(),
        }
    }
}

impl ProviderSettings {
    /// Parse and check the base URL
    pub fn parsed_base_url(&self) -> Result<Url, ConfigurationError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigurationError::invalid("provider.base_url", e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigurationError::invalid(
                "provider.base_url",
                "must be an absolute http(s) URL",
            ));
        }
        Ok(url)
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Result<Duration, ConfigurationError> {
        if !(self.request_timeout.is_finite() && self.request_timeout > 0.0) {
            return Err(ConfigurationError::invalid(
                "provider.request_timeout",
                "must be a positive number of seconds",
            ));
        }
        Duration::try_from_secs_f64(self.request_timeout)
            .map_err(|e| ConfigurationError::invalid("provider.request_timeout", e.to_string()))
    }

    /// Check the transport options
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.parsed_base_url()?;
        self.timeout()?;
        Ok(())
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Which entry point `run` dispatches to
    pub mode: SearchMode,
    /// Provider-side thoroughness
    pub depth: SearchDepth,
    /// Rendered output format
    pub format: OutputFormat,
    /// Serialized-size budget for results
    pub max_tokens: usize,
    /// Maximum number of results surfaced
    pub max_results: usize,
    /// Ask the provider for an answer summary
    pub include_answer: bool,
    /// Force one markdown layout for every entry point
    pub markdown_layout: Option<LayoutKind>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let defaults = SearchConfig::default();
        Self {
            mode: defaults.mode,
            depth: defaults.depth,
            format: defaults.format,
            max_tokens: defaults.max_tokens,
            max_results: defaults.max_results,
            include_answer: defaults.include_answer,
            markdown_layout: defaults.markdown_layout,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8890,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8890);
        assert_eq!(settings.search.max_tokens, 6000);
        assert_eq!(settings.search.max_results, 5);
        assert!(settings.search.include_answer);
        assert_eq!(settings.search.depth, SearchDepth::Advanced);
        assert_eq!(settings.search.format, OutputFormat::Markdown);
        assert!(settings.provider.api_key.is_none());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
search:
  format: json
  depth: basic
  max_results: 3
  markdown_layout: detailed
provider:
  request_timeout: 10
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.search.format, OutputFormat::Json);
        assert_eq!(settings.search.depth, SearchDepth::Basic);
        assert_eq!(settings.search.max_results, 3);
        assert_eq!(settings.search.max_tokens, 6000);
        assert_eq!(settings.search.markdown_layout, Some(LayoutKind::Detailed));
        assert_eq!(settings.provider.request_timeout, 10.0);
        assert_eq!(settings.provider.base_url, crate::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_merge_env_values() {
        let mut settings = Settings::default();
        settings.merge_from(lookup(&[
            ("TAVILY_API_KEY", "tvly-abc"),
            ("TAVILY_SEARCH_FORMAT", "json"),
            ("TAVILY_SEARCH_MAX_TOKENS", "250"),
            ("TAVILY_SEARCH_INCLUDE_ANSWER", "false"),
            ("TAVILY_SEARCH_PORT", "not-a-port"),
        ]));

        assert_eq!(settings.provider.api_key.as_deref(), Some("tvly-abc"));
        assert_eq!(settings.search.format, OutputFormat::Json);
        assert_eq!(settings.search.max_tokens, 250);
        assert!(!settings.search.include_answer);
        assert_eq!(settings.server.port, 8890);
    }

    #[test]
    fn test_blank_env_key_is_ignored() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("from-file".to_string());
        settings.merge_from(lookup(&[("TAVILY_API_KEY", "  ")]));
        assert_eq!(settings.provider.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_search_config_rejects_zero_budget() {
        let mut settings = Settings::default();
        settings.search.max_tokens = 0;
        assert!(matches!(
            settings.search_config(),
            Err(ConfigurationError::InvalidValue { field: "max_tokens", .. })
        ));
    }

    #[test]
    fn test_provider_validation() {
        let mut provider = ProviderSettings::default();
        assert!(provider.validate().is_ok());

        provider.base_url = "not a url".to_string();
        assert!(provider.validate().is_err());

        provider.base_url = crate::DEFAULT_BASE_URL.to_string();
        provider.request_timeout = 0.0;
        assert!(provider.validate().is_err());
    }

    #[test]
    fn test_oversized_timeout_is_rejected() {
        let yaml = "provider:\n  request_timeout: 1.0e20\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            settings.provider.validate(),
            Err(ConfigurationError::InvalidValue {
                field: "provider.request_timeout",
                ..
            })
        ));

        let provider = ProviderSettings {
            request_timeout: 2.5,
            ..Default::default()
        };
        assert_eq!(provider.timeout().unwrap(), Duration::from_millis(2500));
    }
}
