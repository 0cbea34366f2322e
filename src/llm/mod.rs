//! LLM client module for interacting with language models.
//!
//! Uses RIG with Ollama provider for local LLM inference.

mod client;

use anyhow::Result;
use async_trait::async_trait;

pub use client::LlmClient;

/// A text completion backend the QA chain can call.
///
/// Implemented by the RIG-backed Ollama client in production and by
/// scripted fakes in tests.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the model's completion.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
