//! LLM client trait for abstracting different backends
//!
//! Enables swapping between Ollama, OpenAI-compatible APIs, and test doubles.

use async_trait::async_trait;

use crate::core::Result;

/// Trait for LLM backends
///
/// Implementations carry their own model name and endpoint; callers only
/// supply the prompt. No retry or rate limiting is applied at this seam.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a text completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
