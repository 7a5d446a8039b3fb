//! Tavily-Search-RS: a Tavily web search plugin for agent frameworks
//!
//! Wraps the Tavily search API behind three entry points (plain, detailed,
//! and context search), limits results to a serialized-size budget, and
//! renders them as JSON or markdown. The same entry points are exposed as
//! named agent functions, and optionally over HTTP.

pub mod config;
pub mod error;
pub mod functions;
pub mod network;
pub mod observe;
pub mod provider;
pub mod render;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{ConfigurationError, ProviderError, SearchError};
pub use functions::{AgentFunction, FunctionRegistry};
pub use render::OutputFormat;
pub use search::{SearchClient, SearchConfig, SearchDepth, SearchMode};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Default provider base URL
pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;
