//! Per-step metrics collection
//!
//! Records one model-level row (total message count) and one row per agent
//! (messages sent) at the end of every step, and renders plain-text tables
//! for the run summary.

use std::fmt::Write as _;

use crate::core::AgentId;
use crate::sim::agent::Agent;

/// Model-level metrics for one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    /// Step the row was collected at
    pub step: u64,
    /// Total messages across all agents after this step
    pub total_messages: usize,
}

/// Per-agent metrics for one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    /// Step the row was collected at
    pub step: u64,
    /// Agent the row describes
    pub agent: AgentId,
    /// Messages the agent had sent after this step
    pub messages_sent: usize,
}

/// Accumulates per-step aggregate metrics over a run
#[derive(Debug, Default)]
pub struct DataCollector {
    model_rows: Vec<ModelRow>,
    agent_rows: Vec<AgentRow>,
}

impl DataCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record metrics from a read-only snapshot of the agents
    pub fn collect(&mut self, step: u64, agents: &[Box<dyn Agent>]) {
        let total_messages = agents.iter().map(|a| a.messages_sent()).sum();
        self.model_rows.push(ModelRow {
            step,
            total_messages,
        });

        for agent in agents {
            self.agent_rows.push(AgentRow {
                step,
                agent: agent.id(),
                messages_sent: agent.messages_sent(),
            });
        }
    }

    /// Model-level rows, one per collected step
    pub fn model_rows(&self) -> &[ModelRow] {
        &self.model_rows
    }

    /// Per-agent rows, one per agent per collected step
    pub fn agent_rows(&self) -> &[AgentRow] {
        &self.agent_rows
    }

    /// Total message count as of the most recent collection
    pub fn total_messages(&self) -> usize {
        self.model_rows.last().map_or(0, |r| r.total_messages)
    }

    /// Render the model-level rows as an aligned text table
    pub fn render_model_table(&self) -> String {
        let mut out = String::from("Step  Total Messages\n");
        for row in &self.model_rows {
            let _ = writeln!(out, "{:<4}  {}", row.step, row.total_messages);
        }
        out
    }

    /// Render the per-agent rows as an aligned text table
    pub fn render_agent_table(&self) -> String {
        let mut out = String::from("Step  Agent     Messages Sent\n");
        for row in &self.agent_rows {
            let _ = writeln!(
                out,
                "{:<4}  {:<8}  {}",
                row.step,
                row.agent.to_string(),
                row.messages_sent
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AgentId, Message};
    use crate::sim::agent::{Agent, TurnContext};
    use async_trait::async_trait;

    /// Agent with a pre-seeded log, for collection tests
    struct StaticAgent {
        id: AgentId,
        log: Vec<Message>,
    }

    impl StaticAgent {
        fn with_messages(id: u32, count: usize) -> Box<dyn Agent> {
            let id = AgentId(id);
            let log = (0..count)
                .map(|i| Message::greeting(id, i as u64 + 1, "hi"))
                .collect();
            Box::new(Self { id, log })
        }
    }

    #[async_trait]
    impl Agent for StaticAgent {
        fn id(&self) -> AgentId {
            self.id
        }

        fn log(&self) -> &[Message] {
            &self.log
        }

        async fn take_turn(&mut self, _ctx: TurnContext<'_>) -> Option<Message> {
            None
        }
    }

    #[test]
    fn test_collect_totals_and_per_agent_counts() {
        let agents = vec![
            StaticAgent::with_messages(0, 2),
            StaticAgent::with_messages(1, 1),
            StaticAgent::with_messages(2, 0),
        ];

        let mut collector = DataCollector::new();
        collector.collect(1, &agents);

        assert_eq!(collector.total_messages(), 3);
        assert_eq!(collector.model_rows().len(), 1);
        assert_eq!(collector.agent_rows().len(), 3);
        assert_eq!(collector.agent_rows()[0].messages_sent, 2);
        assert_eq!(collector.agent_rows()[2].messages_sent, 0);
    }

    #[test]
    fn test_rows_accumulate_across_steps() {
        let agents = vec![StaticAgent::with_messages(0, 1)];
        let mut collector = DataCollector::new();
        collector.collect(1, &agents);
        collector.collect(2, &agents);

        assert_eq!(collector.model_rows().len(), 2);
        assert_eq!(collector.agent_rows().len(), 2);
        assert_eq!(collector.model_rows()[1].step, 2);
    }

    #[test]
    fn test_table_rendering() {
        let agents = vec![StaticAgent::with_messages(0, 1)];
        let mut collector = DataCollector::new();
        collector.collect(1, &agents);

        let model_table = collector.render_model_table();
        assert!(model_table.contains("Total Messages"));
        assert!(model_table.contains('1'));

        let agent_table = collector.render_agent_table();
        assert!(agent_table.contains("agent-0"));
    }

    #[test]
    fn test_empty_collector() {
        let collector = DataCollector::new();
        assert_eq!(collector.total_messages(), 0);
        assert!(collector.model_rows().is_empty());
    }
}
