//! LLM module - Language Model integrations
//!
//! Provides the `LlmClient` seam and provider implementations, plus a factory
//! that builds a client from a "provider/model-name" identifier.

pub mod models;
pub mod ollama;
pub mod openai;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;

pub use models::{ModelSpec, ProviderKind};
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use traits::LlmClient;

use std::sync::Arc;

use crate::core::{Config, Result};

/// Create a new LLM client based on configuration
pub fn create_client(config: &Config) -> Result<Arc<dyn LlmClient>> {
    let spec: ModelSpec = config.llm.model.parse()?;

    let client: Arc<dyn LlmClient> = match spec.provider {
        ProviderKind::Ollama => Arc::new(OllamaClient::from_config(config, spec.model)),
        ProviderKind::OpenAi => Arc::new(OpenAiClient::from_config(config, spec.model)?),
    };

    Ok(client)
}
