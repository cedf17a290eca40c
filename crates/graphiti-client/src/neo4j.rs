//! Neo4jClient: Bolt client for a Neo4j-backed knowledge graph
//!
//! Episodes are stored as `Episodic` nodes. Entity nodes and `RELATES_TO`
//! edges are read from whatever the graph holds; keyword candidates come from
//! the full-text indices created by `build_indices_and_constraints`.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use neo4rs::{query, Graph, Row};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::GraphitiClient;
use crate::config::{Reranker, SearchConfig, SearchMethod};
use crate::error::{GraphitiError, GraphitiResult};
use crate::models::{AddEpisodeRequest, EntityEdge, EntityNode, EpisodicNode, SearchResults};
use crate::search::{self, lucene_sanitize};

/// Range and full-text indices; every statement is `IF NOT EXISTS`.
const INDEX_QUERIES: &[&str] = &[
    "CREATE INDEX entity_uuid IF NOT EXISTS FOR (n:Entity) ON (n.uuid)",
    "CREATE INDEX episode_uuid IF NOT EXISTS FOR (n:Episodic) ON (n.uuid)",
    "CREATE INDEX community_uuid IF NOT EXISTS FOR (n:Community) ON (n.uuid)",
    "CREATE INDEX relation_uuid IF NOT EXISTS FOR ()-[e:RELATES_TO]-() ON (e.uuid)",
    "CREATE INDEX mention_uuid IF NOT EXISTS FOR ()-[e:MENTIONS]-() ON (e.uuid)",
    "CREATE INDEX entity_group_id IF NOT EXISTS FOR (n:Entity) ON (n.group_id)",
    "CREATE INDEX episode_group_id IF NOT EXISTS FOR (n:Episodic) ON (n.group_id)",
    "CREATE INDEX relation_group_id IF NOT EXISTS FOR ()-[e:RELATES_TO]-() ON (e.group_id)",
    "CREATE INDEX name_entity_index IF NOT EXISTS FOR (n:Entity) ON (n.name)",
    "CREATE INDEX valid_at_episodic_index IF NOT EXISTS FOR (n:Episodic) ON (n.valid_at)",
    "CREATE INDEX valid_at_edge_index IF NOT EXISTS FOR ()-[e:RELATES_TO]-() ON (e.valid_at)",
    "CREATE INDEX invalid_at_edge_index IF NOT EXISTS FOR ()-[e:RELATES_TO]-() ON (e.invalid_at)",
    "CREATE FULLTEXT INDEX episode_content IF NOT EXISTS
     FOR (e:Episodic) ON EACH [e.content, e.source, e.source_description, e.group_id]",
    "CREATE FULLTEXT INDEX node_name_and_summary IF NOT EXISTS
     FOR (n:Entity) ON EACH [n.name, n.summary, n.group_id]",
    "CREATE FULLTEXT INDEX community_name IF NOT EXISTS
     FOR (n:Community) ON EACH [n.name, n.group_id]",
    "CREATE FULLTEXT INDEX edge_name_and_fact IF NOT EXISTS
     FOR ()-[e:RELATES_TO]-() ON EACH [e.name, e.fact, e.group_id]",
];

/// Candidates fetched per method, as a multiple of the requested limit
const CANDIDATE_FACTOR: usize = 2;

/// Network client that connects to Neo4j over Bolt.
///
/// The connection pool lives until `close()`; afterwards every call fails
/// with [`GraphitiError::Closed`].
pub struct Neo4jClient {
    graph: RwLock<Option<Graph>>,
}

impl Neo4jClient {
    /// Open a connection pool.
    ///
    /// # Example
    /// ```no_run
    /// # use graphiti_client::Neo4jClient;
    /// # async fn demo() -> graphiti_client::GraphitiResult<()> {
    /// let client = Neo4jClient::connect("bolt://localhost:7687", "neo4j", "password").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(uri: &str, user: &str, password: &str) -> GraphitiResult<Self> {
        let graph = Graph::new(uri, user, password).await?;
        info!(uri, user, "connected to neo4j");
        Ok(Self {
            graph: RwLock::new(Some(graph)),
        })
    }

    async fn graph(&self) -> GraphitiResult<Graph> {
        self.graph
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(GraphitiError::Closed)
    }
}

fn decode<E: std::fmt::Display>(err: E) -> GraphitiError {
    GraphitiError::Decode(err.to_string())
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Bolt integer for a `LIMIT` parameter, clamped instead of wrapping
fn bolt_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn from_millis(ms: Option<i64>) -> Option<DateTime<Utc>> {
    ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

#[derive(Deserialize)]
struct RawAttribute {
    key: String,
    value: Option<String>,
}

fn edge_from_row(row: &Row) -> GraphitiResult<EntityEdge> {
    Ok(EntityEdge {
        uuid: row.get("uuid").map_err(decode)?,
        source_node_uuid: row.get("source_node_uuid").map_err(decode)?,
        target_node_uuid: row.get("target_node_uuid").map_err(decode)?,
        name: row.get::<Option<String>>("name").map_err(decode)?.unwrap_or_default(),
        fact: row.get::<Option<String>>("fact").map_err(decode)?.unwrap_or_default(),
        valid_at: from_millis(row.get("valid_at").map_err(decode)?),
        invalid_at: from_millis(row.get("invalid_at").map_err(decode)?),
        created_at: from_millis(row.get("created_at").map_err(decode)?).unwrap_or_else(Utc::now),
        expired_at: from_millis(row.get("expired_at").map_err(decode)?),
        episodes: row
            .get::<Option<Vec<String>>>("episodes")
            .map_err(decode)?
            .unwrap_or_default(),
        group_id: row.get::<Option<String>>("group_id").map_err(decode)?.unwrap_or_default(),
    })
}

fn node_from_row(row: &Row) -> GraphitiResult<EntityNode> {
    let attributes = row
        .get::<Vec<RawAttribute>>("attributes")
        .map_err(decode)?
        .into_iter()
        .filter_map(|a| a.value.map(|v| (a.key, serde_json::Value::String(v))))
        .collect();

    Ok(EntityNode {
        uuid: row.get("uuid").map_err(decode)?,
        name: row.get::<Option<String>>("name").map_err(decode)?.unwrap_or_default(),
        group_id: row.get::<Option<String>>("group_id").map_err(decode)?.unwrap_or_default(),
        labels: row.get("labels").map_err(decode)?,
        summary: row.get::<Option<String>>("summary").map_err(decode)?.unwrap_or_default(),
        attributes,
        created_at: from_millis(row.get("created_at").map_err(decode)?).unwrap_or_else(Utc::now),
    })
}

async fn keyword_edges(graph: &Graph, text: &str, limit: usize) -> GraphitiResult<Vec<EntityEdge>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let q = query(
        "CALL db.index.fulltext.queryRelationships('edge_name_and_fact', $query, {limit: $limit})
         YIELD relationship AS rel, score
         MATCH (n:Entity)-[e:RELATES_TO {uuid: rel.uuid}]->(m:Entity)
         RETURN e.uuid AS uuid,
                n.uuid AS source_node_uuid,
                m.uuid AS target_node_uuid,
                e.name AS name,
                e.fact AS fact,
                e.group_id AS group_id,
                e.episodes AS episodes,
                e.valid_at.epochMillis AS valid_at,
                e.invalid_at.epochMillis AS invalid_at,
                e.created_at.epochMillis AS created_at,
                e.expired_at.epochMillis AS expired_at
         ORDER BY score DESC
         LIMIT $limit",
    )
    .param("query", lucene_sanitize(text))
    .param("limit", bolt_limit(limit));

    let mut edges = Vec::new();
    let mut stream = graph.execute(q).await?;
    while let Some(row) = stream.next().await? {
        edges.push(edge_from_row(&row)?);
    }
    Ok(edges)
}

async fn keyword_nodes(graph: &Graph, text: &str, limit: usize) -> GraphitiResult<Vec<EntityNode>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let q = query(
        "CALL db.index.fulltext.queryNodes('node_name_and_summary', $query, {limit: $limit})
         YIELD node AS n, score
         WHERE n:Entity
         RETURN n.uuid AS uuid,
                n.name AS name,
                n.group_id AS group_id,
                labels(n) AS labels,
                n.summary AS summary,
                n.created_at.epochMillis AS created_at,
                [k IN keys(n)
                    WHERE NOT k IN ['uuid', 'name', 'group_id', 'summary', 'created_at', 'name_embedding', 'labels']
                    | {key: k, value: toStringOrNull(n[k])}] AS attributes
         ORDER BY score DESC
         LIMIT $limit",
    )
    .param("query", lucene_sanitize(text))
    .param("limit", bolt_limit(limit));

    let mut nodes = Vec::new();
    let mut stream = graph.execute(q).await?;
    while let Some(row) = stream.next().await? {
        nodes.push(node_from_row(&row)?);
    }
    Ok(nodes)
}

fn neighbour_uuid(row: &Row) -> GraphitiResult<String> {
    row.get("uuid").map_err(decode)
}

/// One-hop neighbourhood of `center`, only needed for node-distance reranking
async fn neighbours(
    graph: &Graph,
    reranker: Reranker,
    center: Option<&str>,
) -> GraphitiResult<HashSet<String>> {
    if reranker != Reranker::NodeDistance {
        return Ok(HashSet::new());
    }
    let center = center.ok_or_else(search::missing_center)?;

    let q = query(
        "MATCH (center:Entity {uuid: $center})-[:RELATES_TO]-(n:Entity)
         RETURN DISTINCT n.uuid AS uuid",
    )
    .param("center", center);

    let mut found = HashSet::new();
    let mut stream = graph.execute(q).await?;
    while let Some(row) = stream.next().await? {
        found.insert(neighbour_uuid(&row)?);
    }
    Ok(found)
}

fn keyword_methods(methods: &[SearchMethod]) -> usize {
    methods
        .iter()
        .filter(|method| {
            if method.requires_embeddings() {
                debug!(?method, "search method needs embeddings, skipped");
                false
            } else {
                true
            }
        })
        .count()
}

#[async_trait]
impl GraphitiClient for Neo4jClient {
    async fn build_indices_and_constraints(&self) -> GraphitiResult<()> {
        let graph = self.graph().await?;
        for statement in INDEX_QUERIES {
            graph.run(query(statement)).await?;
        }
        info!(count = INDEX_QUERIES.len(), "indices and constraints ensured");
        Ok(())
    }

    async fn add_episode(&self, request: AddEpisodeRequest) -> GraphitiResult<EpisodicNode> {
        let graph = self.graph().await?;
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

        let q = query(
            "MERGE (e:Episodic {uuid: $uuid})
             SET e.name = $name,
                 e.group_id = $group_id,
                 e.source = $source,
                 e.source_description = $source_description,
                 e.content = $content,
                 e.entity_edges = [],
                 e.valid_at = datetime($valid_at),
                 e.created_at = datetime($created_at)",
        )
        .param("uuid", episode.uuid.as_str())
        .param("name", episode.name.as_str())
        .param("group_id", episode.group_id.as_str())
        .param("source", episode.source.as_str())
        .param("source_description", episode.source_description.as_str())
        .param("content", episode.content.as_str())
        .param("valid_at", format_datetime(&episode.valid_at))
        .param("created_at", format_datetime(&episode.created_at));

        graph.run(q).await?;
        debug!(uuid = %episode.uuid, name = %episode.name, source = %episode.source, "episode stored");
        Ok(episode)
    }

    async fn search_with_config(
        &self,
        text: &str,
        config: &SearchConfig,
        center_node_uuid: Option<&str>,
    ) -> GraphitiResult<SearchResults> {
        let graph = self.graph().await?;
        let candidates = config.limit.saturating_mul(CANDIDATE_FACTOR);
        let mut results = SearchResults::default();

        if let Some(edge_config) = &config.edge_config {
            let mut lists = Vec::new();
            for _ in 0..keyword_methods(&edge_config.search_methods) {
                lists.push(keyword_edges(&graph, text, candidates).await?);
            }
            let near = neighbours(&graph, edge_config.reranker, center_node_uuid).await?;
            results.edges =
                search::rerank_edges(&lists, edge_config.reranker, center_node_uuid, &near, config)?;
        }

        if let Some(node_config) = &config.node_config {
            let mut lists = Vec::new();
            for _ in 0..keyword_methods(&node_config.search_methods) {
                lists.push(keyword_nodes(&graph, text, candidates).await?);
            }
            let near = neighbours(&graph, node_config.reranker, center_node_uuid).await?;
            results.nodes =
                search::rerank_nodes(&lists, node_config.reranker, center_node_uuid, &near, config)?;
        }

        debug!(
            query = text,
            edges = results.edges.len(),
            nodes = results.nodes.len(),
            "search finished"
        );
        Ok(results)
    }

    async fn close(&self) -> GraphitiResult<()> {
        let mut graph = self.graph.write().await;
        match graph.take() {
            Some(_) => {
                info!("neo4j connection pool released");
                Ok(())
            }
            None => Err(GraphitiError::Closed),
        }
    }
}
