//! Search helpers shared by both clients
//!
//! Candidate lists come from the client (full-text index or in-memory
//! keyword match); everything after that, fusion, reranking and truncation,
//! happens here so both clients order results the same way.

use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::config::{Reranker, SearchConfig};
use crate::error::{GraphitiError, GraphitiResult};
use crate::models::{EntityEdge, EntityNode};

/// Rank constant `k` in `1 / (rank + k)`
pub const RRF_RANK_CONSTANT: f64 = 1.0;

/// Anything with a stable identity in the graph
pub trait HasUuid {
    fn uuid(&self) -> &str;
}

impl HasUuid for EntityEdge {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl HasUuid for EntityNode {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// Escape Lucene special characters for Neo4j full-text queries.
///
/// Escapes `+ - ! ( ) { } [ ] ^ " ~ * ? : \ /` and the operators `&&` / `||`.
pub fn lucene_sanitize(query: &str) -> String {
    const SPECIAL: &[char] = &[
        '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\', '/',
    ];

    let mut out = String::with_capacity(query.len() * 2);
    let mut chars = query.chars().peekable();

    while let Some(c) = chars.next() {
        if (c == '&' || c == '|') && chars.peek() == Some(&c) {
            chars.next();
            out.push('\\');
            out.push(c);
            out.push(c);
            continue;
        }
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }

    out
}

/// Reciprocal rank fusion over ranked candidate lists.
///
/// Items are identified by uuid; the first occurrence is the one kept.
/// Equal scores keep first-appearance order. Items scoring below
/// `min_score` are dropped.
pub fn rrf<T: HasUuid + Clone>(lists: &[Vec<T>], min_score: f64) -> Vec<T> {
    let mut scores: HashMap<String, f64> = HashMap::new();
    let mut order: Vec<T> = Vec::new();

    for list in lists {
        for (rank, item) in list.iter().enumerate() {
            let contribution = 1.0 / (rank as f64 + RRF_RANK_CONSTANT);
            match scores.get_mut(item.uuid()) {
                Some(score) => *score += contribution,
                None => {
                    scores.insert(item.uuid().to_string(), contribution);
                    order.push(item.clone());
                }
            }
        }
    }

    let mut ranked: Vec<(f64, T)> = order
        .into_iter()
        .map(|item| {
            let score = scores.get(item.uuid()).copied().unwrap_or(0.0);
            (score, item)
        })
        .filter(|(score, _)| *score >= min_score)
        .collect();

    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    ranked.into_iter().map(|(_, item)| item).collect()
}

/// 0 for the center itself, 1 for a direct neighbour, 2 for anything else
fn distance_tier(uuid: &str, center: &str, neighbours: &HashSet<String>) -> u8 {
    if uuid == center {
        0
    } else if neighbours.contains(uuid) {
        1
    } else {
        2
    }
}

/// Order edges by the hop distance of their source node to `center`.
///
/// Stable inside each distance tier, so the incoming relevance order is
/// kept among equally distant edges.
pub fn rerank_by_node_distance(
    mut edges: Vec<EntityEdge>,
    center: &str,
    neighbours: &HashSet<String>,
) -> Vec<EntityEdge> {
    edges.sort_by_key(|e| distance_tier(&e.source_node_uuid, center, neighbours));
    edges
}

/// Order nodes by their own hop distance to `center`.
pub fn rerank_nodes_by_distance(
    mut nodes: Vec<EntityNode>,
    center: &str,
    neighbours: &HashSet<String>,
) -> Vec<EntityNode> {
    nodes.sort_by_key(|n| distance_tier(&n.uuid, center, neighbours));
    nodes
}

/// Most-mentioned edges first; stable for ties.
pub fn rerank_by_episode_mentions(mut edges: Vec<EntityEdge>) -> Vec<EntityEdge> {
    edges.sort_by_key(|e| Reverse(e.episodes.len()));
    edges
}

pub(crate) fn missing_center() -> GraphitiError {
    GraphitiError::Search("node distance reranking requires a center node".to_string())
}

/// Fuse and rerank edge candidates, then cut to `config.limit`.
pub fn rerank_edges(
    lists: &[Vec<EntityEdge>],
    reranker: Reranker,
    center: Option<&str>,
    neighbours: &HashSet<String>,
    config: &SearchConfig,
) -> GraphitiResult<Vec<EntityEdge>> {
    let fused = rrf(lists, config.reranker_min_score);
    let mut edges = match reranker {
        Reranker::Rrf => fused,
        Reranker::NodeDistance => {
            let center = center.ok_or_else(missing_center)?;
            rerank_by_node_distance(fused, center, neighbours)
        }
        Reranker::EpisodeMentions => rerank_by_episode_mentions(fused),
        Reranker::Mmr | Reranker::CrossEncoder => {
            warn!(?reranker, "reranker unavailable without embeddings, using rrf");
            fused
        }
    };
    edges.truncate(config.limit);
    Ok(edges)
}

/// Fuse and rerank node candidates, then cut to `config.limit`.
pub fn rerank_nodes(
    lists: &[Vec<EntityNode>],
    reranker: Reranker,
    center: Option<&str>,
    neighbours: &HashSet<String>,
    config: &SearchConfig,
) -> GraphitiResult<Vec<EntityNode>> {
    let fused = rrf(lists, config.reranker_min_score);
    let mut nodes = match reranker {
        Reranker::Rrf => fused,
        Reranker::NodeDistance => {
            let center = center.ok_or_else(missing_center)?;
            rerank_nodes_by_distance(fused, center, neighbours)
        }
        Reranker::EpisodeMentions | Reranker::Mmr | Reranker::CrossEncoder => {
            warn!(?reranker, "reranker unavailable for nodes, using rrf");
            fused
        }
    };
    nodes.truncate(config.limit);
    Ok(nodes)
}
