//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single result as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// The title of the result
    #[serde(default)]
    pub title: String,
    /// The URL of the result
    #[serde(default)]
    pub url: String,
    /// Content snippet
    #[serde(default)]
    pub content: String,
    /// Provider relevance score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RawResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Body of a provider search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Generated answer, when requested
    #[serde(default)]
    pub answer: Option<String>,
    /// Ranked results
    #[serde(default)]
    pub results: Vec<RawResult>,
}

impl ProviderResponse {
    pub fn with_results(results: Vec<RawResult>) -> Self {
        Self {
            answer: None,
            results,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// The answer, if present and not blank
    pub fn non_empty_answer(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// Projection of a [`RawResult`] kept in rendered output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanResult {
    pub title: String,
    pub url: String,
    pub content: String,
    pub score: f64,
}

impl From<&RawResult> for CleanResult {
    fn from(raw: &RawResult) -> Self {
        Self {
            title: raw.title.clone(),
            url: raw.url.clone(),
            content: raw.content.clone(),
            score: raw.score.unwrap_or(0.0),
        }
    }
}

/// What a search renders: the query, an optional answer, and results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub results: Vec<CleanResult>,
}

impl SearchEnvelope {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: None,
            results: Vec::new(),
        }
    }
}
