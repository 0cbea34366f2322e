//! Neo4j connection handling and Cypher execution.

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{Graph, query};
use serde_json::Value;
use tracing::{debug, info};

use super::GraphStore;
use crate::config::AppConfig;

/// Connection handle to a Neo4j database.
///
/// The underlying driver connects lazily, so construction is cheap and
/// connectivity problems surface on the first query (the startup schema
/// fetch, in practice).
pub struct GraphClient {
    graph: Graph, // neo4rs driver handle
}

impl GraphClient {
    /// Create a new graph client.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// A new `GraphClient` instance.
    ///
    /// # Errors
    /// Returns an error if the driver rejects the connection parameters.
    pub fn connect(config: &AppConfig) -> Result<Self> {
        info!("Connecting to Neo4j at {}", config.neo4j_uri);

        let graph = Graph::new(&config.neo4j_uri, &config.neo4j_username, &config.neo4j_password)
            .context("Failed to create Neo4j driver")?;

        Ok(Self { graph })
    }

    /// Collect a single string column from an introspection procedure.
    async fn collect_column(&self, cypher: &str, column: &str) -> Result<Vec<String>> {
        let mut rows = self.graph.execute(query(cypher)).await?;
        let mut values = Vec::new();

        while let Some(row) = rows.next().await? {
            values.push(row.get::<String>(column)?);
        }

        Ok(values)
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn query(&self, cypher: &str) -> Result<Vec<Value>> {
        debug!("Executing Cypher: {}", cypher);

        let mut rows = self.graph.execute(query(cypher)).await.context("Cypher execution failed")?;
        let mut results = Vec::new();

        while let Some(row) = rows.next().await.context("Failed to fetch result row")? {
            results.push(row.to::<Value>().context("Failed to decode result row")?);
        }

        debug!("Query returned {} row(s)", results.len());

        Ok(results)
    }

    async fn schema_text(&self) -> Result<String> {
        let labels = self
            .collect_column("CALL db.labels() YIELD label RETURN label", "label")
            .await
            .context("Failed to list node labels")?;

        let relationships = self
            .collect_column(
                "CALL db.relationshipTypes() YIELD relationshipType RETURN relationshipType",
                "relationshipType",
            )
            .await
            .context("Failed to list relationship types")?;

        let properties = self
            .collect_column("CALL db.propertyKeys() YIELD propertyKey RETURN propertyKey", "propertyKey")
            .await
            .context("Failed to list property keys")?;

        Ok(format!(
            "Node labels: {}\nRelationship types: {}\nProperty keys: {}",
            labels.join(", "),
            relationships.join(", "),
            properties.join(", ")
        ))
    }
}
