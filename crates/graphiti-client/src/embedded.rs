//! EmbeddedClient: in-process knowledge graph client
//!
//! Keeps episodes, entity nodes and edges in memory, no network needed.
//! Keyword candidates are ranked by how many query terms a fact (or a node's
//! name and summary) contains.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::GraphitiClient;
use crate::config::{Reranker, SearchConfig};
use crate::error::{GraphitiError, GraphitiResult};
use crate::models::{AddEpisodeRequest, EntityEdge, EntityNode, EpisodicNode, SearchResults};
use crate::search;

/// In-memory graph state
#[derive(Debug, Default)]
pub struct MemoryGraph {
    pub episodes: Vec<EpisodicNode>,
    pub nodes: Vec<EntityNode>,
    pub edges: Vec<EntityEdge>,
    pub indices_built: bool,
    pub closed: bool,
}

impl MemoryGraph {
    fn neighbours(&self, center: &str) -> HashSet<String> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.source_node_uuid == center {
                    Some(e.target_node_uuid.clone())
                } else if e.target_node_uuid == center {
                    Some(e.source_node_uuid.clone())
                } else {
                    None
                }
            })
            .collect()
    }
}

/// In-process client over a [`MemoryGraph`].
///
/// Ideal for examples, tests, and running the demos without a database.
pub struct EmbeddedClient {
    graph: Arc<RwLock<MemoryGraph>>,
}

impl EmbeddedClient {
    /// Create a client over an empty graph
    pub fn new() -> Self {
        Self {
            graph: Arc::new(RwLock::new(MemoryGraph::default())),
        }
    }

    /// Create a client over a graph seeded with entities and facts
    pub fn with_graph(nodes: Vec<EntityNode>, edges: Vec<EntityEdge>) -> Self {
        Self {
            graph: Arc::new(RwLock::new(MemoryGraph {
                nodes,
                edges,
                ..MemoryGraph::default()
            })),
        }
    }

    /// Shared handle to the graph state
    pub fn graph(&self) -> &Arc<RwLock<MemoryGraph>> {
        &self.graph
    }

    /// Episodes ingested so far, in ingestion order
    pub async fn episodes(&self) -> Vec<EpisodicNode> {
        self.graph.read().await.episodes.clone()
    }

    /// Whether `close()` has been called
    pub async fn is_closed(&self) -> bool {
        self.graph.read().await.closed
    }
}

impl Default for EmbeddedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase alphanumeric terms of at least two characters
fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_lowercase())
        .collect()
}

/// Items with at least one matching term, most matches first
fn keyword_rank<T: Clone>(items: &[T], query: &HashSet<String>, text: impl Fn(&T) -> String) -> Vec<T> {
    let mut scored: Vec<(usize, &T)> = items
        .iter()
        .map(|item| (terms(&text(item)).intersection(query).count(), item))
        .filter(|(hits, _)| *hits > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item.clone()).collect()
}

#[async_trait]
impl GraphitiClient for EmbeddedClient {
    async fn build_indices_and_constraints(&self) -> GraphitiResult<()> {
        let mut graph = self.graph.write().await;
        if graph.closed {
            return Err(GraphitiError::Closed);
        }
        graph.indices_built = true;
        Ok(())
    }

    async fn add_episode(&self, request: AddEpisodeRequest) -> GraphitiResult<EpisodicNode> {
        let mut graph = self.graph.write().await;
        if graph.closed {
            return Err(GraphitiError::Closed);
        }

        let episode = EpisodicNode {
            uuid: Uuid::new_v4().to_string(),
            name: request.name,
            group_id: String::new(),
            source: request.source,
            source_description: request.source_description,
            content: request.episode_body,
            valid_at: request.reference_time,
            created_at: Utc::now(),
        };
        debug!(uuid = %episode.uuid, name = %episode.name, "episode stored in memory");
        graph.episodes.push(episode.clone());
        Ok(episode)
    }

    async fn search_with_config(
        &self,
        text: &str,
        config: &SearchConfig,
        center_node_uuid: Option<&str>,
    ) -> GraphitiResult<SearchResults> {
        let graph = self.graph.read().await;
        if graph.closed {
            return Err(GraphitiError::Closed);
        }

        let query = terms(text);
        let near = center_node_uuid
            .map(|center| graph.neighbours(center))
            .unwrap_or_default();
        let mut results = SearchResults::default();

        if let Some(edge_config) = &config.edge_config {
            if edge_config.reranker == Reranker::NodeDistance && center_node_uuid.is_none() {
                return Err(search::missing_center());
            }
            let lists: Vec<Vec<EntityEdge>> = edge_config
                .search_methods
                .iter()
                .filter(|method| !method.requires_embeddings())
                .map(|_| keyword_rank(&graph.edges, &query, |e: &EntityEdge| format!("{} {}", e.name, e.fact)))
                .collect();
            results.edges =
                search::rerank_edges(&lists, edge_config.reranker, center_node_uuid, &near, config)?;
        }

        if let Some(node_config) = &config.node_config {
            let lists: Vec<Vec<EntityNode>> = node_config
                .search_methods
                .iter()
                .filter(|method| !method.requires_embeddings())
                .map(|_| keyword_rank(&graph.nodes, &query, |n: &EntityNode| format!("{} {}", n.name, n.summary)))
                .collect();
            results.nodes =
                search::rerank_nodes(&lists, node_config.reranker, center_node_uuid, &near, config)?;
        }

        Ok(results)
    }

    async fn close(&self) -> GraphitiResult<()> {
        let mut graph = self.graph.write().await;
        if graph.closed {
            return Err(GraphitiError::Closed);
        }
        graph.closed = true;
        info!(episodes = graph.episodes.len(), "embedded graph closed");
        Ok(())
    }
}
