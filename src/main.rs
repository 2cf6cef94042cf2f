//! Colloquy - LLM-Driven Conversation Simulator
//!
//! Main entry point for the CLI application.

use clap::Parser;
use colloquy::core::Config;
use colloquy::sim::ConversationModel;

/// Colloquy - LLM-Driven Conversation Simulator
#[derive(Parser, Debug)]
#[command(name = "colloquy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of agents to create
    #[arg(long, short = 'a')]
    agents: Option<usize>,

    /// Number of steps to run
    #[arg(long, short = 's')]
    steps: Option<u64>,

    /// Model identifier in "provider/model-name" form
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Seed for reproducible peer selection
    #[arg(long)]
    seed: Option<u64>,

    /// Personality descriptor, repeatable; assigned round-robin
    #[arg(long = "personality", short = 'p')]
    personalities: Vec<String>,

    /// Run each step's turns concurrently
    #[arg(long)]
    concurrent: bool,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(agents) = args.agents {
        config.simulation.agents = agents;
    }

    if let Some(steps) = args.steps {
        config.simulation.steps = steps;
    }

    if let Some(model) = args.model {
        config.llm.model = model;
    }

    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }

    if !args.personalities.is_empty() {
        config.simulation.personalities = args.personalities;
    }

    if args.concurrent {
        config.simulation.concurrent_turns = true;
    }

    if args.debug {
        config.simulation.debug = true;
    }

    // Fails early on an unparseable model spec or a missing API key.
    let llm = colloquy::llm::create_client(&config)?;

    println!("=== Starting Conversation Simulation ===");
    println!(
        "Model: {} | Agents: {} | Steps: {}\n",
        config.llm.model, config.simulation.agents, config.simulation.steps
    );

    let mut model = ConversationModel::new(&config.simulation, llm)?;

    for _ in 0..config.simulation.steps {
        let report = if config.simulation.concurrent_turns {
            model.step_concurrent().await
        } else {
            model.step().await
        };

        println!("--- Step {} ---", report.step);
        for message in &report.messages {
            match message.responding_to {
                Some(peer) => println!("[{} -> {}] {}", message.speaker, peer, message.text),
                None => println!("[{}] {}", message.speaker, message.text),
            }
        }
        println!();
    }

    println!("=== Simulation Complete ===\n");
    println!("Data Collection Results:\n");
    println!("Model Data:");
    println!("{}", model.datacollector().render_model_table());
    println!("Agent Data:");
    println!("{}", model.datacollector().render_agent_table());

    Ok(())
}
