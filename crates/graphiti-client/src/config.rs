//! Search configuration
//!
//! A `SearchConfig` says which scopes to search (edges, nodes), which
//! retrieval methods feed each scope, and how the candidate lists are merged.
//! Predefined combinations live in [`crate::recipes`].

use serde::{Deserialize, Serialize};

/// Default number of results per scope
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Candidate retrieval method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// Keyword search over the full-text index
    Bm25,
    /// Embedding similarity
    CosineSimilarity,
    /// Breadth-first expansion from seed nodes
    Bfs,
}

impl SearchMethod {
    /// Whether the method needs embeddings or seed nodes that the clients
    /// in this crate do not produce
    pub fn requires_embeddings(&self) -> bool {
        !matches!(self, SearchMethod::Bm25)
    }
}

/// Strategy for merging and ordering candidate lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reranker {
    /// Reciprocal rank fusion
    Rrf,
    /// Graph distance to a center node
    NodeDistance,
    /// Number of episodes mentioning the result
    EpisodeMentions,
    /// Maximal marginal relevance
    Mmr,
    /// Cross-encoder scoring
    CrossEncoder,
}

/// Edge scope settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSearchConfig {
    pub search_methods: Vec<SearchMethod>,
    pub reranker: Reranker,
}

/// Node scope settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSearchConfig {
    pub search_methods: Vec<SearchMethod>,
    pub reranker: Reranker,
}

/// Full search recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub edge_config: Option<EdgeSearchConfig>,
    pub node_config: Option<NodeSearchConfig>,
    /// Maximum results per scope
    pub limit: usize,
    /// Results scoring below this are dropped (fusion scores only)
    pub reranker_min_score: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            edge_config: None,
            node_config: None,
            limit: DEFAULT_SEARCH_LIMIT,
            reranker_min_score: 0.0,
        }
    }
}
