//! Registry of runnable examples.

use std::fmt;
use std::str::FromStr;

use graphiti_client::GraphitiClient;
use tracing::info;

use crate::config::Config;
use crate::connection::Connection;
use crate::error::{ExampleError, ExampleResult};
use crate::quickstart;

/// Named example scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleStrategy {
    /// Ingest, search, rerank, node search
    Quickstart,
    /// Agent-driven conversation over the graph; reserved
    LanggraphAgent,
}

impl ExampleStrategy {
    pub const ALL: [ExampleStrategy; 2] = [ExampleStrategy::Quickstart, ExampleStrategy::LanggraphAgent];

    pub fn name(&self) -> &'static str {
        match self {
            ExampleStrategy::Quickstart => "quickstart",
            ExampleStrategy::LanggraphAgent => "langgraph_agent",
        }
    }
}

impl fmt::Display for ExampleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExampleStrategy {
    type Err = ExampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| ExampleError::UnknownStrategy(s.to_string()))
    }
}

/// Runs a strategy against an open connection.
#[derive(Debug, Clone, Default)]
pub struct ExampleCart {
    config: Config,
}

impl ExampleCart {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute `strategy`. The connection is closed on every path.
    pub async fn execute<C: GraphitiClient>(
        &self,
        strategy: ExampleStrategy,
        conn: Connection<C>,
    ) -> ExampleResult<()> {
        info!(%strategy, "running example");
        match strategy {
            ExampleStrategy::Quickstart => quickstart::run(conn, &self.config).await,
            ExampleStrategy::LanggraphAgent => {
                conn.close().await?;
                Err(ExampleError::NotImplemented(ExampleStrategy::LanggraphAgent.name()))
            }
        }
    }
}
