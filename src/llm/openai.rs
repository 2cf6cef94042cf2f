//! OpenAI-compatible client implementation
//!
//! Works against the chat completions endpoint of api.openai.com or any
//! compatible gateway (configurable base URL). Reads the API key from the
//! `OPENAI_API_KEY` environment variable.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::core::{ColloquyError, Config, Result};
use crate::llm::traits::LlmClient;

/// Environment variable holding the API key
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI-compatible chat completions client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    debug: bool,
}

/// Chat completions request
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
}

/// Message in a chat completions request
#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// Message within a completion choice
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a new client from configuration
    ///
    /// Fails if `OPENAI_API_KEY` is not set.
    pub fn from_config(config: &Config, model: impl Into<String>) -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| ColloquyError::MissingApiKey(API_KEY_VAR))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            base_url: config.llm.openai_base_url.clone(),
            api_key,
            model: model.into(),
            debug: config.simulation.debug,
        })
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.len() > 500 {
                // Back up to a char boundary so truncation cannot split a
                // multibyte character.
                let mut end = 500;
                while !content.is_char_boundary(end) {
                    end -= 1;
                }
                eprintln!("DEBUG {}: {}...", label, &content[..end]);
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![CompletionMessage {
                role: "user",
                content: prompt,
            }],
        };

        self.debug_print("Request", &serde_json::to_string(&request)?);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ColloquyError::provider(format!("Cannot connect to {}", self.base_url))
                } else {
                    ColloquyError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(ColloquyError::provider(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        self.debug_print("Response", &response_text);

        let completion: CompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| ColloquyError::generation(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ColloquyError::generation("Response contained no completion text"))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
