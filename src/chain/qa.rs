//! Question answering over the drug graph by generating and executing Cypher.

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, warn};

use super::prompts;
use crate::graph::GraphStore;
use crate::llm::LanguageModel;

/// Chain construction errors.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The operator has not accepted that generated queries run unreviewed.
    #[error(
        "model-generated Cypher runs unchecked against the live database; \
         pass --allow-dangerous-queries to accept that risk"
    )]
    DangerousQueriesDisabled,
}

/// Tunables for the QA chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainOptions {
    /// Explicit opt-in acknowledging that generated queries execute without
    /// review or a read-only restriction.
    pub allow_dangerous_queries: bool,
    /// Maximum number of result rows handed to the summarization prompt.
    pub top_k: usize,
}

/// The answer for one question, with the intermediate artifacts kept for
/// logging and inspection.
#[derive(Debug, Clone)]
pub struct ChainResponse {
    /// Natural-language answer.
    pub answer: String,
    /// Generated Cypher query, after code-fence extraction.
    pub cypher: String,
    /// Query result rows serialized as JSON, as handed to the QA prompt.
    pub context: String,
}

/// Chain answering natural-language questions against a graph database:
/// generate a Cypher query with the language model, execute it, then have
/// the model summarize the rows.
pub struct GraphCypherQaChain<M, G> {
    llm: M,
    graph: G,
    schema: String, // cached schema text, fetched once at construction
    top_k: usize,
}

impl<M: LanguageModel, G: GraphStore> GraphCypherQaChain<M, G> {
    /// Build the chain, fetching the graph schema once up front.
    ///
    /// # Errors
    /// Returns [`ChainError::DangerousQueriesDisabled`] unless the operator
    /// opted in, or an error if schema introspection fails (the first real
    /// round-trip to the database).
    pub async fn from_parts(llm: M, graph: G, options: ChainOptions) -> Result<Self> {
        if !options.allow_dangerous_queries {
            return Err(ChainError::DangerousQueriesDisabled.into());
        }

        let schema = graph.schema_text().await.context("Failed to introspect graph schema")?;

        Ok(Self { llm, graph, schema, top_k: options.top_k })
    }

    /// Answer one natural-language question.
    ///
    /// A generated query that fails to execute degrades to an empty result
    /// context for this turn; model errors propagate.
    pub async fn run(&self, question: &str) -> Result<ChainResponse> {
        let generation_prompt =
            prompts::fill(prompts::CYPHER_GENERATION_TEMPLATE, &[("schema", self.schema.as_str()), ("question", question)]);
        let completion = self.llm.complete(&generation_prompt).await.context("Cypher generation failed")?;
        let cypher = prompts::extract_cypher(&completion);

        info!("Generated Cypher: {}", cypher);

        let context = if cypher.is_empty() {
            "[]".to_string()
        } else {
            match self.graph.query(&cypher).await {
                Ok(rows) => {
                    let limited: Vec<_> = rows.into_iter().take(self.top_k).collect();
                    serde_json::to_string(&limited).unwrap_or_else(|_| "[]".to_string())
                }
                Err(e) => {
                    warn!("Generated query failed to execute: {:#}", e);
                    "[]".to_string()
                }
            }
        };

        info!("Query results: {}", context);

        let qa_prompt = prompts::fill(prompts::QA_TEMPLATE, &[("context", context.as_str()), ("question", question)]);
        let answer = self.llm.complete(&qa_prompt).await.context("Answer synthesis failed")?;

        Ok(ChainResponse { answer, cypher, context })
    }
}
