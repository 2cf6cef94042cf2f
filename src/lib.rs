//! Colloquy - LLM-Driven Conversation Simulator
//!
//! An agent-based simulation where LLM-backed agents take turns greeting and
//! responding to one another under a sequential scheduler.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Client abstraction with Ollama and OpenAI-compatible backends
//! - **Sim**: Agents, turn policy, scheduler, model, and data collection
//!
//! # Usage
//!
//! ```rust,no_run
//! use colloquy::core::Config;
//! use colloquy::sim::ConversationModel;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load();
//!     let llm = colloquy::llm::create_client(&config).unwrap();
//!     let mut model = ConversationModel::new(&config.simulation, llm).unwrap();
//!
//!     for _ in 0..3 {
//!         let report = model.step().await;
//!         for message in &report.messages {
//!             println!("[{}] {}", message.speaker, message.text);
//!         }
//!     }
//! }
//! ```

pub mod core;
pub mod llm;
pub mod sim;

// Re-export commonly used items
pub use core::{ColloquyError, Config, Result};
pub use sim::ConversationModel;
