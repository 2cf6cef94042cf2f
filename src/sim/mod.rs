//! Simulation module - agents, scheduling, and metrics
//!
//! Contains the turn policy, the sequential scheduler, the simulation driver,
//! and per-step data collection.

pub mod agent;
pub mod collector;
pub mod model;
pub mod scheduler;

pub use agent::{Agent, ConversationAgent, TurnContext, TurnState};
pub use collector::{AgentRow, DataCollector, ModelRow};
pub use model::ConversationModel;
pub use scheduler::Scheduler;
