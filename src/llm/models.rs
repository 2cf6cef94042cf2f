//! Model identifier parsing
//!
//! Run configuration names models in "provider/model-name" form, e.g.
//! "ollama/llama3.2" or "openai/gpt-4o-mini".

use std::fmt;
use std::str::FromStr;

use crate::core::error::ColloquyError;

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Local Ollama server
    Ollama,
    /// OpenAI-compatible chat completions API
    OpenAi,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Ollama => write!(f, "ollama"),
            ProviderKind::OpenAi => write!(f, "openai"),
        }
    }
}

/// A parsed "provider/model-name" identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    /// Which backend serves the model
    pub provider: ProviderKind,
    /// Model name as the provider knows it
    pub model: String,
}

impl FromStr for ModelSpec {
    type Err = ColloquyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, model) = s
            .split_once('/')
            .ok_or_else(|| ColloquyError::ModelSpec(s.to_string()))?;

        if model.is_empty() {
            return Err(ColloquyError::ModelSpec(s.to_string()));
        }

        let provider = match provider {
            "ollama" => ProviderKind::Ollama,
            "openai" => ProviderKind::OpenAi,
            other => {
                return Err(ColloquyError::provider(format!(
                    "Unknown provider '{}' (supported: ollama, openai)",
                    other
                )))
            }
        };

        Ok(Self {
            provider,
            model: model.to_string(),
        })
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}
