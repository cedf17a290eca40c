//! Quickstart: ingest the example episodes, then search three ways.

use graphiti_client::{recipes, GraphitiClient};

use crate::config::Config;
use crate::connection::Connection;
use crate::dataset::{self, ATTORNEY_GENERAL_QUERY, GOVERNOR_QUERY, NODE_SEARCH_LIMIT};
use crate::error::ExampleResult;

/// Run the quickstart and close `conn` afterwards, even when a step fails.
/// A step error wins over a close error.
pub async fn run<C: GraphitiClient>(mut conn: Connection<C>, config: &Config) -> ExampleResult<()> {
    let outcome = steps(&mut conn, config).await;
    let closed = conn.close().await;
    outcome.and(closed)
}

async fn steps<C: GraphitiClient>(conn: &mut Connection<C>, config: &Config) -> ExampleResult<()> {
    if config.enable_indexing {
        conn.ingest_episodes(&dataset::episodes()).await?;
    } else {
        conn.report("\nIndexing is disabled.")?;
    }

    conn.report(&format!("\nSearching for: '{}'", ATTORNEY_GENERAL_QUERY))?;
    let results = conn.hybrid_search(ATTORNEY_GENERAL_QUERY).await?;
    conn.center_node_search(ATTORNEY_GENERAL_QUERY, &results).await?;

    conn.report("\nPerforming node search with the node_hybrid_search_rrf recipe:")?;
    let mut node_config = recipes::node_hybrid_search_rrf();
    node_config.limit = NODE_SEARCH_LIMIT;
    conn.node_search_by_recipe(GOVERNOR_QUERY, &node_config).await?;

    Ok(())
}
