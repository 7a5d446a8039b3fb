//! Function traits and types

use crate::error::SearchError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Declaration advertised to the host framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Function name
    pub name: String,
    /// What the function does, shown to the model
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: Value,
}

/// Errors from invoking a function
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("unknown function `{0}`")]
    NotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Display keeps the `Search failed: ` prefix hosts expect in tool output
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}

/// A function callable by an agent
#[async_trait]
pub trait AgentFunction: Send + Sync {
    /// Name, description, and parameter schema
    fn declaration(&self) -> FunctionDeclaration;

    /// Run the function with JSON arguments
    async fn invoke(&self, arguments: Value) -> Result<String, FunctionError>;

    /// Function name
    fn name(&self) -> String {
        self.declaration().name
    }
}

/// Deserialize an arguments object into `T`
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, FunctionError> {
    serde_json::from_value(arguments).map_err(|e| FunctionError::InvalidArguments(e.to_string()))
}
