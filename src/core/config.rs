//! Configuration management for Colloquy
//!
//! Supports environment variables, config files, and runtime overrides.
//! Run parameters are fixed at model construction for the run's duration.
//!
//! Config file location: ~/.config/colloquy/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{ColloquyError, Result};

/// Main configuration for Colloquy
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM backend configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Simulation run parameters
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// LLM backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier in "provider/model-name" form
    /// Default: ollama/llama3.2
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Base URL for OpenAI-compatible providers
    pub openai_base_url: String,
    /// Ollama server configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

/// Ollama server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Host address (default: localhost)
    pub host: String,
    /// Port number (default: 11434)
    pub port: u16,
}

/// Simulation run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of agents to create
    pub agents: usize,
    /// Number of steps to run
    pub steps: u64,
    /// Seed for reproducible peer selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Personality descriptors, assigned round-robin to agents
    pub personalities: Vec<String>,
    /// Run each step's turns concurrently instead of sequentially
    pub concurrent_turns: bool,
    /// Whether to show debug output
    pub debug: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: env::var("COLLOQUY_MODEL").unwrap_or_else(|_| "ollama/llama3.2".to_string()),
            timeout_secs: 120,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            ollama: OllamaConfig::default(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: env::var("OLLAMA_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("OLLAMA_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(11434),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agents: 3,
            steps: 3,
            seed: None,
            personalities: default_personalities(),
            concurrent_turns: false,
            debug: env::var("COLLOQUY_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Built-in personality descriptors used when none are configured
pub fn default_personalities() -> Vec<String> {
    vec![
        "friendly and outgoing, always eager to help others".to_string(),
        "thoughtful and philosophical, likes to reflect deeply".to_string(),
        "witty and humorous, enjoys making jokes".to_string(),
    ]
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("colloquy")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(ColloquyError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ColloquyError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ColloquyError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Get the full Ollama API URL
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.llm.ollama.host, self.llm.ollama.port)
    }
}

impl SimulationConfig {
    /// Personality for the i-th agent, assigned round-robin
    pub fn personality_for(&self, index: usize) -> &str {
        &self.personalities[index % self.personalities.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.ollama.port, 11434);
        assert_eq!(config.simulation.agents, 3);
        assert_eq!(config.simulation.steps, 3);
        assert!(!config.simulation.concurrent_turns);
        assert_eq!(config.simulation.personalities.len(), 3);
    }

    #[test]
    fn test_ollama_url() {
        let mut config = Config::default();
        config.llm.ollama.host = "localhost".to_string();
        config.llm.ollama.port = 11434;
        assert_eq!(config.ollama_url(), "http://localhost:11434");
    }

    #[test]
    fn test_personality_round_robin() {
        let sim = SimulationConfig::default();
        assert_eq!(sim.personality_for(0), sim.personality_for(3));
        assert_eq!(sim.personality_for(1), sim.personality_for(4));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("model"));
        assert!(toml_str.contains("personalities"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.simulation.agents, config.simulation.agents);
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("colloquy"));
    }
}
