//! Simulation driver
//!
//! Owns the scheduler, the step counter, the LLM client handle, and the data
//! collector; advancing the simulation is delegating one step to the scheduler
//! and then recording post-step metrics.

use std::sync::Arc;

use crate::core::config::SimulationConfig;
use crate::core::{AgentId, ColloquyError, Result, StepReport};
use crate::llm::LlmClient;
use crate::sim::agent::ConversationAgent;
use crate::sim::collector::DataCollector;
use crate::sim::scheduler::Scheduler;

/// A simulation where agents converse with each other through an LLM
pub struct ConversationModel {
    schedule: Scheduler,
    llm: Arc<dyn LlmClient>,
    datacollector: DataCollector,
    step: u64,
}

impl ConversationModel {
    /// Create a model with the configured number of agents
    ///
    /// Personalities are assigned round-robin from the configured list. The
    /// agent collection is fixed for the run; the step counter starts at 0 and
    /// the first step is numbered 1.
    pub fn new(config: &SimulationConfig, llm: Arc<dyn LlmClient>) -> Result<Self> {
        if config.agents == 0 {
            return Err(ColloquyError::config("At least one agent is required"));
        }
        if config.personalities.is_empty() {
            return Err(ColloquyError::config(
                "At least one personality is required",
            ));
        }

        let mut schedule = Scheduler::new();
        for i in 0..config.agents {
            let agent = ConversationAgent::new(
                AgentId(i as u32),
                config.personality_for(i),
                config.seed,
            );
            schedule.add(Box::new(agent))?;
        }

        Ok(Self {
            schedule,
            llm,
            datacollector: DataCollector::new(),
            step: 0,
        })
    }

    /// Execute one step of the model, sequentially
    ///
    /// Never fails: generation errors surface as placeholder messages in the
    /// transcript. A step is never retried or undone.
    pub async fn step(&mut self) -> StepReport {
        self.step += 1;
        let messages = self.schedule.step(self.step, self.llm.as_ref()).await;
        self.datacollector.collect(self.step, self.schedule.agents());

        StepReport {
            step: self.step,
            messages,
        }
    }

    /// Execute one step with all agents' turns awaited concurrently
    ///
    /// See [`Scheduler::step_concurrent`] for the peer-view snapshot race this
    /// variant accepts.
    pub async fn step_concurrent(&mut self) -> StepReport {
        self.step += 1;
        let messages = self
            .schedule
            .step_concurrent(self.step, self.llm.as_ref())
            .await;
        self.datacollector.collect(self.step, self.schedule.agents());

        StepReport {
            step: self.step,
            messages,
        }
    }

    /// Steps executed so far
    pub fn current_step(&self) -> u64 {
        self.step
    }

    /// Number of agents in the run
    pub fn num_agents(&self) -> usize {
        self.schedule.len()
    }

    /// The scheduler and its agents
    pub fn schedule(&self) -> &Scheduler {
        &self.schedule
    }

    /// Collected metrics
    pub fn datacollector(&self) -> &DataCollector {
        &self.datacollector
    }

    /// Total messages sent by all agents so far
    pub fn total_messages(&self) -> usize {
        self.schedule
            .agents()
            .iter()
            .map(|a| a.messages_sent())
            .sum()
    }
}
