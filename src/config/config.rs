//! Application configuration and CLI argument parsing.

use anyhow::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Drug graph assistant configuration.
///
/// Connection parameters are normally supplied through the environment
/// (NEO4J_URI, NEO4J_USERNAME, NEO4J_PASSWORD, OLLAMA_MODEL); every value
/// can also be given as a command-line flag.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "drug-graph-assistant")]
#[command(author, version, about = "An interactive drug price assistant over a Neo4j graph", long_about = None)]
pub struct AppConfig {
    /// Neo4j connection URI (e.g. bolt://localhost:7687)
    #[arg(long, env = "NEO4J_URI")]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, env = "NEO4J_USERNAME")]
    pub neo4j_username: String,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: String,

    /// Ollama API URL
    #[arg(long, short = 'u', env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Ollama model name
    #[arg(long, short = 'm', env = "OLLAMA_MODEL")]
    pub ollama_model: String,

    /// LLM temperature (0.0-2.0). Keep low so generated Cypher stays deterministic
    #[arg(long, default_value = "0.0", value_parser = parse_temperature)]
    pub temperature: f32,

    /// Maximum number of query result rows passed to the summarization prompt
    #[arg(long, default_value = "10")]
    pub top_k: usize,

    /// Acknowledge that model-generated Cypher executes against the live
    /// database unreviewed, including write queries
    #[arg(long, env = "ALLOW_DANGEROUS_QUERIES")]
    pub allow_dangerous_queries: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments and the environment.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.neo4j_uri.trim().is_empty() {
            anyhow::bail!("Neo4j URI must not be empty");
        }

        if self.ollama_model.trim().is_empty() {
            anyhow::bail!("Ollama model must not be empty");
        }

        if self.top_k == 0 {
            anyhow::bail!("top-k must be at least 1");
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Neo4j URI: {}", self.neo4j_uri);
        info!("  Neo4j username: {}", self.neo4j_username);
        info!("  Ollama URL: {}", self.ollama_url);
        info!("  Ollama model: {}", self.ollama_model);
        info!("  Temperature: {}", self.temperature);
        info!("  Top K rows: {}", self.top_k);
        info!("  Allow dangerous queries: {}", self.allow_dangerous_queries);
    }
}

/// Parse and validate temperature value (0.0-2.0).
fn parse_temperature(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a valid float", s))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("temperature must be between 0.0 and 2.0, got {}", value))
    }
}
