//! Test doubles for the `LlmClient` seam
//!
//! Shared by the unit test modules; integration tests define their own.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::{ColloquyError, Result};
use crate::llm::traits::LlmClient;

/// Returns scripted replies in order, then errors
pub struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedClient {
    pub fn new<S: Into<String>>(replies: Vec<S>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ColloquyError::generation("script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Counts calls and replies with a fixed string
pub struct CountingClient {
    calls: AtomicUsize,
}

impl CountingClient {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for CountingClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("ok".to_string())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Always fails with the configured message
pub struct FailingClient {
    message: String,
}

impl FailingClient {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl LlmClient for FailingClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(ColloquyError::provider(self.message.clone()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
