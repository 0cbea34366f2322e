//! Graph question-answering chain.
//!
//! Composes the language model and the graph client: generate Cypher from a
//! question, execute it against Neo4j, and summarize the rows into an answer.

mod prompts;
mod qa;

pub use qa::{ChainError, ChainOptions, ChainResponse, GraphCypherQaChain};
