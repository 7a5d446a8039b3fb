//! Error types
//!
//! Every search entry point returns [`SearchError`]; construction problems
//! surface as [`ConfigurationError`] before any request is made.

use thiserror::Error;

/// Errors raised while building a client from configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No credential was passed and the environment variable is unset or empty
    #[error("{} not provided", crate::API_KEY_ENV)]
    MissingApiKey,

    /// An option holds a value the client cannot work with
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// The settings file could not be read or parsed
    #[error("failed to load settings: {0}")]
    Load(String),
}

impl ConfigurationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures talking to the remote search provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider body did not match the expected shape
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// HTTP status code, when the provider produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            Self::Decode(_) => None,
        }
    }
}

/// Error returned by every [`SearchClient`](crate::SearchClient) entry point
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("failed to render results: {0}")]
    Render(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_variable() {
        let err = ConfigurationError::MissingApiKey;
        assert_eq!(err.to_string(), "TAVILY_API_KEY not provided");
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let err = SearchError::from(ProviderError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        });
        assert_eq!(err.to_string(), "provider returned HTTP 401: Unauthorized");
    }

    #[test]
    fn test_status_accessor() {
        let err = ProviderError::Api {
            status: 429,
            message: String::new(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(ProviderError::Decode("bad".into()).status(), None);
    }
}
