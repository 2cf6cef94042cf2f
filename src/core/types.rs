//! Shared types used across Colloquy modules
//!
//! Contains agent identity, conversation messages, and step reports.

use serde::{Deserialize, Serialize};

/// Unique identity of an agent within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// A message emitted by an agent during a step
///
/// Immutable once created. Messages are appended only by their speaker and
/// totally ordered by step number, then scheduling order within a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Agent that produced the message
    pub speaker: AgentId,
    /// Step in which the message was produced
    pub step: u64,
    /// Generated text (or an error placeholder on generation failure)
    pub text: String,
    /// Peer whose latest message this one responds to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responding_to: Option<AgentId>,
}

impl Message {
    /// Create a greeting message (an agent's first, addressed to no one)
    pub fn greeting(speaker: AgentId, step: u64, text: impl Into<String>) -> Self {
        Self {
            speaker,
            step,
            text: text.into(),
            responding_to: None,
        }
    }

    /// Create a response message targeting a peer's latest message
    pub fn response(speaker: AgentId, step: u64, text: impl Into<String>, peer: AgentId) -> Self {
        Self {
            speaker,
            step,
            text: text.into(),
            responding_to: Some(peer),
        }
    }

    /// Whether this message is a response to a peer
    pub fn is_response(&self) -> bool {
        self.responding_to.is_some()
    }
}

/// A read-only view of a peer used during a turn
///
/// Carries the peer's id and its most recently appended message, cloned at
/// view-construction time so a turn never borrows another agent's log.
#[derive(Debug, Clone)]
pub struct PeerView {
    /// Peer's identity
    pub id: AgentId,
    /// The peer's latest message at the time the view was taken
    pub latest: Message,
}

/// Transcript of a single simulation step
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Step number (first step is 1)
    pub step: u64,
    /// Messages produced this step, in scheduling order
    pub messages: Vec<Message>,
}

impl StepReport {
    /// Number of messages produced this step
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the step produced no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
