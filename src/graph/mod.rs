//! Graph database module backed by Neo4j.
//!
//! Provides connection handling, schema introspection, and Cypher execution.

mod client;

use anyhow::Result;
use async_trait::async_trait;

pub use client::GraphClient;

/// A graph database the QA chain can introspect and query.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run a Cypher query and return one JSON object per result row.
    async fn query(&self, cypher: &str) -> Result<Vec<serde_json::Value>>;

    /// Render the graph schema (node labels, relationship types, property
    /// keys) as text for the Cypher generation prompt.
    async fn schema_text(&self) -> Result<String>;
}
