//! Graphiti client: knowledge graph boundary for the example harness
//!
//! Provides two client implementations:
//!
//! - **`Neo4jClient`**: Connects to Neo4j over Bolt. Creates the index
//!   schema, stores episodes, answers keyword/graph searches.
//!
//! - **`EmbeddedClient`**: In-process, no network. Keeps the graph in memory.
//!   Ideal for tests, examples, and running without a database.
//!
//! Both implement the `GraphitiClient` trait for a unified API.
//!
//! # Quick Start
//!
//! ```rust
//! use graphiti_client::{EmbeddedClient, GraphitiClient, recipes};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = EmbeddedClient::new();
//!     client.build_indices_and_constraints().await.unwrap();
//!
//!     let edges = client.search("California Governor", None).await.unwrap();
//!     println!("Found {} facts", edges.len());
//!
//!     let mut config = recipes::node_hybrid_search_rrf();
//!     config.limit = 5;
//!     let results = client.search_with_config("California", &config, None).await.unwrap();
//!     println!("Found {} nodes", results.nodes.len());
//!
//!     client.close().await.unwrap();
//! }
//! ```

pub mod client;
pub mod config;
pub mod embedded;
pub mod error;
pub mod models;
pub mod neo4j;
pub mod recipes;
pub mod search;

pub use client::GraphitiClient;
pub use config::{
    EdgeSearchConfig, NodeSearchConfig, Reranker, SearchConfig, SearchMethod, DEFAULT_SEARCH_LIMIT,
};
pub use embedded::{EmbeddedClient, MemoryGraph};
pub use error::{GraphitiError, GraphitiResult};
pub use models::{
    AddEpisodeRequest, EntityEdge, EntityNode, EpisodeType, EpisodicNode, SearchResults,
};
pub use neo4j::Neo4jClient;
