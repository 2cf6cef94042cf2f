//! Sequential agent scheduler
//!
//! Holds agents in insertion order and gives each one turn per step. Steps
//! iterate over a snapshot of the membership taken at step start, so removing
//! an agent between turns cannot corrupt the in-progress iteration.

use std::collections::HashMap;

use futures::future::join_all;

use crate::core::{AgentId, ColloquyError, Message, PeerView, Result};
use crate::llm::LlmClient;
use crate::sim::agent::{Agent, TurnContext};

/// Ordered collection of agents with per-step turn dispatch
#[derive(Default)]
pub struct Scheduler {
    agents: Vec<Box<dyn Agent>>,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Append an agent to the schedule
    ///
    /// Fails if an agent with the same id is already scheduled.
    pub fn add(&mut self, agent: Box<dyn Agent>) -> Result<()> {
        if self.contains(agent.id()) {
            return Err(ColloquyError::DuplicateAgent(agent.id()));
        }
        self.agents.push(agent);
        Ok(())
    }

    /// Detach an agent from the schedule, returning it if present
    pub fn remove(&mut self, id: AgentId) -> Option<Box<dyn Agent>> {
        let index = self.agents.iter().position(|a| a.id() == id)?;
        Some(self.agents.remove(index))
    }

    /// Whether an agent with this id is scheduled
    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.iter().any(|a| a.id() == id)
    }

    /// The scheduled agents, in insertion order
    pub fn agents(&self) -> &[Box<dyn Agent>] {
        &self.agents
    }

    /// Number of scheduled agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the schedule is empty
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Views of every agent except `exclude` that has spoken at least once
    fn peer_views(&self, exclude: AgentId) -> Vec<PeerView> {
        self.agents
            .iter()
            .filter(|a| a.id() != exclude)
            .filter_map(|a| {
                a.latest_message().map(|m| PeerView {
                    id: a.id(),
                    latest: m.clone(),
                })
            })
            .collect()
    }

    /// Give every agent one turn, strictly in insertion order
    ///
    /// Peer views are rebuilt before each turn, so an agent sees messages its
    /// earlier-scheduled peers produced this same step. Returns the step's
    /// transcript in scheduling order.
    pub async fn step(&mut self, step: u64, llm: &dyn LlmClient) -> Vec<Message> {
        let order: Vec<AgentId> = self.agents.iter().map(|a| a.id()).collect();
        let mut transcript = Vec::new();

        for id in order {
            let peers = self.peer_views(id);
            // Agents removed after the snapshot are skipped.
            let Some(agent) = self.agents.iter_mut().find(|a| a.id() == id) else {
                continue;
            };

            let ctx = TurnContext {
                step,
                peers: &peers,
                llm,
            };
            if let Some(message) = agent.take_turn(ctx).await {
                transcript.push(message);
            }
        }

        transcript
    }

    /// Give every agent one turn, awaiting all turns concurrently
    ///
    /// Peer views are snapshotted once at step start, so an agent may respond
    /// to a peer's message from the previous step even if the peer has already
    /// produced a newer one this step. That interleaving is accepted; the
    /// transcript is still returned in scheduling order.
    pub async fn step_concurrent(&mut self, step: u64, llm: &dyn LlmClient) -> Vec<Message> {
        let mut views: HashMap<AgentId, Vec<PeerView>> = self
            .agents
            .iter()
            .map(|a| (a.id(), self.peer_views(a.id())))
            .collect();

        let turns = self.agents.iter_mut().map(|agent| {
            let peers = views.remove(&agent.id()).unwrap_or_default();
            async move {
                let ctx = TurnContext {
                    step,
                    peers: &peers,
                    llm,
                };
                agent.take_turn(ctx).await
            }
        });

        join_all(turns).await.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::CountingClient;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records the order in which turns were dispatched
    struct ProbeAgent {
        id: AgentId,
        order: Arc<Mutex<Vec<AgentId>>>,
        log: Vec<Message>,
    }

    impl ProbeAgent {
        fn new(id: u32, order: Arc<Mutex<Vec<AgentId>>>) -> Box<Self> {
            Box::new(Self {
                id: AgentId(id),
                order,
                log: Vec::new(),
            })
        }
    }

    #[async_trait]
    impl Agent for ProbeAgent {
        fn id(&self) -> AgentId {
            self.id
        }

        fn log(&self) -> &[Message] {
            &self.log
        }

        async fn take_turn(&mut self, ctx: TurnContext<'_>) -> Option<Message> {
            self.order.lock().unwrap().push(self.id);
            let message = Message::greeting(self.id, ctx.step, "probe");
            self.log.push(message.clone());
            Some(message)
        }
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add(ProbeAgent::new(0, order.clone())).unwrap();

        let result = scheduler.add(ProbeAgent::new(0, order));
        assert!(matches!(result, Err(ColloquyError::DuplicateAgent(_))));
        assert_eq!(scheduler.len(), 1);
    }

    #[tokio::test]
    async fn test_step_invokes_each_agent_once_in_add_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        for id in [3, 1, 2, 0] {
            scheduler.add(ProbeAgent::new(id, order.clone())).unwrap();
        }

        let llm = CountingClient::new();
        let transcript = scheduler.step(1, &llm).await;

        let expected = vec![AgentId(3), AgentId(1), AgentId(2), AgentId(0)];
        assert_eq!(*order.lock().unwrap(), expected);
        // Transcript order matches scheduling order.
        let speakers: Vec<AgentId> = transcript.iter().map(|m| m.speaker).collect();
        assert_eq!(speakers, expected);
    }

    #[tokio::test]
    async fn test_removed_agent_is_not_invoked() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        for id in 0..3 {
            scheduler.add(ProbeAgent::new(id, order.clone())).unwrap();
        }

        assert!(scheduler.remove(AgentId(1)).is_some());
        assert!(!scheduler.contains(AgentId(1)));

        let llm = CountingClient::new();
        scheduler.step(1, &llm).await;

        assert_eq!(*order.lock().unwrap(), vec![AgentId(0), AgentId(2)]);
    }

    #[tokio::test]
    async fn test_peer_views_exclude_self_and_silent_agents() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        for id in 0..3 {
            scheduler.add(ProbeAgent::new(id, order.clone())).unwrap();
        }

        // Before anyone speaks, no agent has eligible peers.
        assert!(scheduler.peer_views(AgentId(0)).is_empty());

        let llm = CountingClient::new();
        scheduler.step(1, &llm).await;

        let views = scheduler.peer_views(AgentId(0));
        let ids: Vec<AgentId> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![AgentId(1), AgentId(2)]);
    }

    #[tokio::test]
    async fn test_concurrent_step_returns_scheduling_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        for id in 0..4 {
            scheduler.add(ProbeAgent::new(id, order.clone())).unwrap();
        }

        let llm = CountingClient::new();
        let transcript = scheduler.step_concurrent(1, &llm).await;

        let speakers: Vec<AgentId> = transcript.iter().map(|m| m.speaker).collect();
        assert_eq!(
            speakers,
            vec![AgentId(0), AgentId(1), AgentId(2), AgentId(3)]
        );
    }
}
