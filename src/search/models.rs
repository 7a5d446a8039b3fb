//! Search configuration and related enums

use crate::error::ConfigurationError;
use crate::render::{LayoutKind, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entry point selected by [`SearchClient::run`](super::SearchClient::run)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Structured results, truncated to the token budget
    #[default]
    Detailed,
    /// Raw context string from the provider
    Context,
}

impl FromStr for SearchMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "detailed" => Ok(Self::Detailed),
            "context" => Ok(Self::Context),
            other => Err(ConfigurationError::invalid(
                "mode",
                format!("expected `detailed` or `context`, got `{}`", other),
            )),
        }
    }
}

/// Provider-side thoroughness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchDepth {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            other => Err(ConfigurationError::invalid(
                "depth",
                format!("expected `basic` or `advanced`, got `{}`", other),
            )),
        }
    }
}

/// Immutable search configuration.
///
/// Built once, validated by [`SearchConfig::validate`], and shared read-only
/// by every call a [`SearchClient`](super::SearchClient) makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Entry point used by `run` (default: detailed)
    pub mode: SearchMode,
    /// Provider search depth (default: advanced)
    pub depth: SearchDepth,
    /// Output format (default: markdown)
    pub format: OutputFormat,
    /// Budget for the summed serialized size of results (default: 6000)
    pub max_tokens: usize,
    /// Result cap (default: 5)
    pub max_results: usize,
    /// Include the provider's answer summary (default: true)
    pub include_answer: bool,
    /// Markdown layout used by every entry point; `None` keeps each
    /// entry point's own layout
    pub markdown_layout: Option<LayoutKind>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Detailed,
            depth: SearchDepth::Advanced,
            format: OutputFormat::Markdown,
            max_tokens: 6000,
            max_results: 5,
            include_answer: true,
            markdown_layout: None,
        }
    }
}

impl SearchConfig {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_depth(mut self, depth: SearchDepth) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_include_answer(mut self, include_answer: bool) -> Self {
        self.include_answer = include_answer;
        self
    }

    pub fn with_markdown_layout(mut self, layout: LayoutKind) -> Self {
        self.markdown_layout = Some(layout);
        self
    }

    /// Check every numeric option is usable
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_tokens == 0 {
            return Err(ConfigurationError::invalid(
                "max_tokens",
                "token budget must be positive",
            ));
        }
        if self.max_results == 0 {
            return Err(ConfigurationError::invalid(
                "max_results",
                "result cap must be positive",
            ));
        }
        Ok(())
    }
}
