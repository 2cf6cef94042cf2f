//! Conversation agents and the turn policy
//!
//! An agent greets the group on its first turn, then spends every later turn
//! responding to the latest message of a randomly chosen peer that has already
//! spoken. Generation failures become visible placeholder messages instead of
//! aborting the step.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::core::{AgentId, Message, PeerView};
use crate::llm::LlmClient;

/// Everything an agent may read during one turn
///
/// `peers` is restricted to agents that have spoken at least once, excluding
/// the acting agent; the scheduler builds it fresh before each turn.
pub struct TurnContext<'a> {
    /// Current step number
    pub step: u64,
    /// Views of peers eligible to be responded to
    pub peers: &'a [PeerView],
    /// Backend used to generate message text
    pub llm: &'a dyn LlmClient,
}

/// Per-agent state machine
///
/// Transitions Introducing → Responding after the first completed turn and
/// never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// The agent has not yet taken its first turn in the run
    Introducing,
    /// All turns after the first
    Responding,
}

/// Capability interface shared by every schedulable agent
#[async_trait]
pub trait Agent: Send + Sync {
    /// Unique identity within the run
    fn id(&self) -> AgentId;

    /// Chronological log of messages this agent has emitted
    fn log(&self) -> &[Message];

    /// Take one turn, appending zero or one message to the agent's own log
    ///
    /// The returned message is a clone of the appended one, or `None` for a
    /// silent turn. An agent only ever mutates its own state.
    async fn take_turn(&mut self, ctx: TurnContext<'_>) -> Option<Message>;

    /// The agent's most recently appended message
    fn latest_message(&self) -> Option<&Message> {
        self.log().last()
    }

    /// Total messages this agent has sent so far
    fn messages_sent(&self) -> usize {
        self.log().len()
    }
}

/// An agent that converses with peers through an LLM backend
pub struct ConversationAgent {
    id: AgentId,
    personality: String,
    state: TurnState,
    log: Vec<Message>,
    rng: StdRng,
}

impl ConversationAgent {
    /// Create an agent with the given identity and personality
    ///
    /// When `seed` is set, the agent derives its own RNG from it so peer
    /// selection is reproducible in sequential runs and each agent's RNG stays
    /// private during concurrent ones.
    pub fn new(id: AgentId, personality: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(id.0))),
            None => StdRng::from_os_rng(),
        };

        Self {
            id,
            personality: personality.into(),
            state: TurnState::Introducing,
            log: Vec::new(),
            rng,
        }
    }

    /// The agent's personality descriptor
    pub fn personality(&self) -> &str {
        &self.personality
    }

    /// Current turn state
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Prompt for the agent's first message
    fn greeting_prompt(&self) -> String {
        format!(
            "You are participating in a casual conversation. \
             Your personality: {}. \
             Introduce yourself to the group in one or two sentences. \
             Be natural and stay true to your personality.",
            self.personality
        )
    }

    /// Prompt for a response to a peer's latest message
    fn response_prompt(&self, peer: &PeerView) -> String {
        format!(
            "You are participating in a casual conversation. \
             Your personality: {}. \
             {} said: \"{}\". \
             Reply to them in one or two sentences. \
             Be natural and stay true to your personality.",
            self.personality, peer.id, peer.latest.text
        )
    }

    /// Generate text, converting any failure into a placeholder
    ///
    /// Keeps the per-step contract (zero or one message per agent) intact even
    /// when the provider fails; the step never aborts.
    async fn generate_or_placeholder(&self, llm: &dyn LlmClient, prompt: &str) -> String {
        match llm.generate(prompt).await {
            Ok(text) => text,
            Err(e) => format!("[generation failed: {}]", e),
        }
    }
}

#[async_trait]
impl Agent for ConversationAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn log(&self) -> &[Message] {
        &self.log
    }

    async fn take_turn(&mut self, ctx: TurnContext<'_>) -> Option<Message> {
        match self.state {
            TurnState::Introducing => {
                let prompt = self.greeting_prompt();
                let text = self.generate_or_placeholder(ctx.llm, &prompt).await;
                let message = Message::greeting(self.id, ctx.step, text);
                self.log.push(message.clone());
                self.state = TurnState::Responding;
                Some(message)
            }
            TurnState::Responding => {
                // Empty filtered peer set means a silent turn: no message, no
                // LLM call. Not an error.
                let peer = ctx.peers.choose(&mut self.rng)?.clone();
                let prompt = self.response_prompt(&peer);
                let text = self.generate_or_placeholder(ctx.llm, &prompt).await;
                let message = Message::response(self.id, ctx.step, text, peer.id);
                self.log.push(message.clone());
                Some(message)
            }
        }
    }
}
