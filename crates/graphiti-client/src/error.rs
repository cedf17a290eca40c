//! Error types for the graphiti client

use thiserror::Error;

/// Errors that can occur when talking to the knowledge graph
#[derive(Error, Debug)]
pub enum GraphitiError {
    /// Bolt transport or Cypher execution error (Neo4j mode)
    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),

    /// A result row could not be decoded into a model type
    #[error("Decode error: {0}")]
    Decode(String),

    /// The search configuration cannot be executed
    #[error("Search error: {0}")]
    Search(String),

    /// Invalid input value
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client was already closed
    #[error("Client is closed")]
    Closed,
}

pub type GraphitiResult<T> = Result<T, GraphitiError>;
