//! Error types for the example harness

use graphiti_client::GraphitiError;
use thiserror::Error;

/// Errors raised while running an example
#[derive(Error, Debug)]
pub enum ExampleError {
    /// Missing or empty connection settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything the knowledge graph client raised, unaltered
    #[error(transparent)]
    Client(#[from] GraphitiError),

    /// Structured episode content could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing the console report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No strategy is registered under this name
    #[error("Unknown example strategy: {0}")]
    UnknownStrategy(String),

    /// The strategy is registered but has no implementation yet
    #[error("Example strategy not implemented: {0}")]
    NotImplemented(&'static str),
}

pub type ExampleResult<T> = Result<T, ExampleError>;
