//! Drug Graph Assistant - an interactive drug price assistant backed by Neo4j.
//!
//! This application answers questions about brand drugs and their generic
//! alternatives by letting a local language model (Ollama via RIG) generate
//! Cypher queries against a Neo4j graph and summarize the results.

mod chain;
mod config;
mod graph;
mod llm;
mod repl;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use chain::{ChainOptions, GraphCypherQaChain};
use config::AppConfig;
use graph::GraphClient;
use llm::LlmClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments and environment
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("💊 Drug Graph Assistant v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        std::process::exit(1);
    }

    config.log_config();

    // Construct the two clients once; failures here are fatal
    let graph = GraphClient::connect(&config)?;
    let llm = LlmClient::new(&config)?;

    // Building the chain fetches the schema, the first real database
    // round-trip, and enforces the dangerous-query opt-in
    let options = ChainOptions { allow_dangerous_queries: config.allow_dangerous_queries, top_k: config.top_k };
    let qa_chain = GraphCypherQaChain::from_parts(llm, graph, options).await?;

    info!("Graph schema loaded, ready for questions");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    repl::run(&qa_chain, stdin).await?;

    info!("✅ Assistant stopped");
    Ok(())
}
