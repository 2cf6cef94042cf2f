//! Custom error types for Colloquy
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

use crate::core::types::AgentId;

/// Main error type for Colloquy operations
#[derive(Error, Debug)]
pub enum ColloquyError {
    /// LLM provider connection or API errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider accepted the request but produced no usable text
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model identifier could not be parsed as "provider/model-name"
    #[error("Invalid model spec '{0}': expected \"provider/model-name\"")]
    ModelSpec(String),

    /// An agent with this id is already scheduled
    #[error("Agent {0} is already scheduled")]
    DuplicateAgent(AgentId),

    /// Required API key is not set in the environment
    #[error("{0} not set. Add it to your environment or .env file")]
    MissingApiKey(&'static str),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience Result type for Colloquy operations
pub type Result<T> = std::result::Result<T, ColloquyError>;

impl ColloquyError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a generation error
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
