//! Predefined search recipes
//!
//! Each recipe returns a fresh, owned [`SearchConfig`]; adjust the copy
//! before use:
//!
//! ```
//! use graphiti_client::recipes;
//!
//! let mut config = recipes::node_hybrid_search_rrf();
//! config.limit = 5;
//! assert!(config.node_config.is_some());
//! ```

use crate::config::{EdgeSearchConfig, NodeSearchConfig, Reranker, SearchConfig, SearchMethod};

fn hybrid() -> Vec<SearchMethod> {
    vec![SearchMethod::Bm25, SearchMethod::CosineSimilarity]
}

fn edges(reranker: Reranker) -> EdgeSearchConfig {
    EdgeSearchConfig {
        search_methods: hybrid(),
        reranker,
    }
}

fn nodes(reranker: Reranker) -> NodeSearchConfig {
    NodeSearchConfig {
        search_methods: hybrid(),
        reranker,
    }
}

/// Edge search, keyword + semantic, fused with RRF
pub fn edge_hybrid_search_rrf() -> SearchConfig {
    SearchConfig {
        edge_config: Some(edges(Reranker::Rrf)),
        ..SearchConfig::default()
    }
}

/// Edge search reranked by distance to a center node
pub fn edge_hybrid_search_node_distance() -> SearchConfig {
    SearchConfig {
        edge_config: Some(edges(Reranker::NodeDistance)),
        ..SearchConfig::default()
    }
}

/// Edge search reranked by episode mentions
pub fn edge_hybrid_search_episode_mentions() -> SearchConfig {
    SearchConfig {
        edge_config: Some(edges(Reranker::EpisodeMentions)),
        ..SearchConfig::default()
    }
}

/// Node search, keyword + semantic, fused with RRF
pub fn node_hybrid_search_rrf() -> SearchConfig {
    SearchConfig {
        node_config: Some(nodes(Reranker::Rrf)),
        ..SearchConfig::default()
    }
}

/// Node search reranked by distance to a center node
pub fn node_hybrid_search_node_distance() -> SearchConfig {
    SearchConfig {
        node_config: Some(nodes(Reranker::NodeDistance)),
        ..SearchConfig::default()
    }
}

/// Edges and nodes together, both fused with RRF
pub fn combined_hybrid_search_rrf() -> SearchConfig {
    SearchConfig {
        edge_config: Some(edges(Reranker::Rrf)),
        node_config: Some(nodes(Reranker::Rrf)),
        ..SearchConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SEARCH_LIMIT;

    #[test]
    fn test_recipes_scope() {
        let edge = edge_hybrid_search_rrf();
        assert!(edge.edge_config.is_some());
        assert!(edge.node_config.is_none());

        let node = node_hybrid_search_rrf();
        assert!(node.edge_config.is_none());
        assert_eq!(node.node_config.unwrap().reranker, Reranker::Rrf);

        let combined = combined_hybrid_search_rrf();
        assert!(combined.edge_config.is_some() && combined.node_config.is_some());
    }

    #[test]
    fn test_recipe_copies_are_independent() {
        let mut tuned = node_hybrid_search_rrf();
        tuned.limit = 5;

        assert_eq!(tuned.limit, 5);
        assert_eq!(node_hybrid_search_rrf().limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_node_distance_recipe() {
        let config = edge_hybrid_search_node_distance();
        assert_eq!(config.edge_config.unwrap().reranker, Reranker::NodeDistance);
    }
}
