//! Graphiti examples
//!
//! A small harness that opens a knowledge-graph connection, ingests a fixed
//! set of episodes and runs illustrative searches against the result.
//!
//! - [`config`]: settings assembled once from the environment
//! - [`connection`]: console-reporting façade over a `GraphitiClient`
//! - [`strategy`]: named examples and their dispatch
//! - [`quickstart`]: the ingest / search / rerank / node-search walkthrough
//!
//! ## Example Usage
//!
//! ```rust
//! use graphiti_client::EmbeddedClient;
//! use graphiti_examples::{Config, Connection, ExampleCart, ExampleStrategy};
//!
//! #[tokio::main]
//! async fn main() {
//!     let conn = Connection::with_output(EmbeddedClient::new(), std::io::sink());
//!     let cart = ExampleCart::new(Config::default());
//!     cart.execute(ExampleStrategy::Quickstart, conn).await.unwrap();
//! }
//! ```

pub mod config;
pub mod connection;
pub mod dataset;
pub mod episode;
pub mod error;
pub mod quickstart;
pub mod strategy;

pub use config::{Config, Neo4jConfig};
pub use connection::{summary_preview, Connection};
pub use episode::{Episode, EpisodeContent};
pub use error::{ExampleError, ExampleResult};
pub use strategy::{ExampleCart, ExampleStrategy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
