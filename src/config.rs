//! Process configuration.
//!
//! Assembled once at startup from the environment and passed down; nothing
//! else in the crate reads environment variables.

use std::fmt;

use validator::Validate;

use crate::error::{ExampleError, ExampleResult};

pub const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_NEO4J_USER: &str = "neo4j";
pub const DEFAULT_NEO4J_PASSWORD: &str = "password";

const MISSING_CONNECTION: &str = "NEO4J_URI, NEO4J_USER, and NEO4J_PASSWORD must be set";

/// Connection parameters for the graph database.
#[derive(Clone, Validate)]
pub struct Neo4jConfig {
    /// Bolt endpoint. Env: `NEO4J_URI`, default `bolt://localhost:7687`.
    #[validate(length(min = 1))]
    pub uri: String,
    /// Env: `NEO4J_USER`, default `neo4j`.
    #[validate(length(min = 1))]
    pub user: String,
    /// Env: `NEO4J_PASSWORD`, default `password`.
    #[validate(length(min = 1))]
    pub password: String,
}

impl Neo4jConfig {
    /// Reject empty parameters before anything touches the network.
    pub fn check(&self) -> ExampleResult<()> {
        self.validate()
            .map_err(|e| ExampleError::Config(format!("{} ({})", MISSING_CONNECTION, e)))
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_NEO4J_URI.to_string(),
            user: DEFAULT_NEO4J_USER.to_string(),
            password: DEFAULT_NEO4J_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for Neo4jConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything the example driver needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j: Neo4jConfig,
    /// Ingest the example episodes before querying. Env: `ENABLE_INDEXING`,
    /// enabled unless set to something other than `true` (any case).
    pub enable_indexing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            neo4j: Neo4jConfig::default(),
            enable_indexing: true,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> ExampleResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unset variables take their defaults; a variable set to the empty
    /// string stays empty and fails validation.
    pub fn from_lookup<F>(lookup: F) -> ExampleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let neo4j = Neo4jConfig {
            uri: var("NEO4J_URI", DEFAULT_NEO4J_URI),
            user: var("NEO4J_USER", DEFAULT_NEO4J_USER),
            password: var("NEO4J_PASSWORD", DEFAULT_NEO4J_PASSWORD),
        };
        neo4j.check()?;

        let enable_indexing = lookup("ENABLE_INDEXING")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Ok(Self {
            neo4j,
            enable_indexing,
        })
    }
}
