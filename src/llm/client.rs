//! LLM client using RIG with Ollama provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::agent::Agent;
use rig::client::{CompletionClient, Nothing};
use rig::completion::Prompt;
use rig::providers::ollama;
use tracing::{debug, info};

use super::LanguageModel;
use crate::config::AppConfig;

/// LLM client for Cypher generation and answer synthesis with Ollama.
/// Uses RIG framework for simplified LLM interactions.
pub struct LlmClient {
    agent: Agent<ollama::CompletionModel>, // RIG agent with Ollama backend
}

impl LlmClient {
    /// Create a new LLM client.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// A new `LlmClient` instance.
    ///
    /// # Errors
    /// Returns an error if failed to create Ollama client.
    pub fn new(config: &AppConfig) -> Result<Self> {
        info!("Connecting to Ollama at {}", config.ollama_url);
        info!("Using model: {}", config.ollama_model);

        let client = ollama::Client::builder()
            .api_key(Nothing)
            .base_url(&config.ollama_url)
            .build()
            .context("Failed to create Ollama client")?;

        let agent = client
            .agent(&config.ollama_model)
            .temperature(f64::from(config.temperature))
            .build();

        Ok(Self { agent })
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    /// One-shot completion; each chain step is an independent prompt, so no
    /// conversation history is kept.
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Prompt: {}", prompt);

        let response = self.agent.prompt(prompt).await.context("LLM request failed")?;

        debug!("Completion: {}", response);

        Ok(response)
    }
}
