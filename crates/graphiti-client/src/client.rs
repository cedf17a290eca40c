//! GraphitiClient trait: the unified interface for Neo4j and embedded modes

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::error::GraphitiResult;
use crate::models::{AddEpisodeRequest, EntityEdge, EpisodicNode, SearchResults};
use crate::recipes;

/// Unified client interface for the knowledge graph.
///
/// Implemented by:
/// - `Neo4jClient`: connects to Neo4j over Bolt
/// - `EmbeddedClient`: in-process, no network (for examples, tests, demos)
#[async_trait]
pub trait GraphitiClient: Send + Sync {
    /// Create indices and constraints. Safe to call repeatedly.
    async fn build_indices_and_constraints(&self) -> GraphitiResult<()>;

    /// Persist one episode
    async fn add_episode(&self, request: AddEpisodeRequest) -> GraphitiResult<EpisodicNode>;

    /// Hybrid edge search; reranked by graph distance when a center node is given
    async fn search(
        &self,
        query: &str,
        center_node_uuid: Option<&str>,
    ) -> GraphitiResult<Vec<EntityEdge>> {
        let config = match center_node_uuid {
            Some(_) => recipes::edge_hybrid_search_node_distance(),
            None => recipes::edge_hybrid_search_rrf(),
        };
        let results = self.search_with_config(query, &config, center_node_uuid).await?;
        Ok(results.edges)
    }

    /// Lower-level search driven by an explicit recipe
    async fn search_with_config(
        &self,
        query: &str,
        config: &SearchConfig,
        center_node_uuid: Option<&str>,
    ) -> GraphitiResult<SearchResults>;

    /// Release the underlying handle
    async fn close(&self) -> GraphitiResult<()>;
}
