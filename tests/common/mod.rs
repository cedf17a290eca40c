//! Shared fixtures: a recording stub client and a capturable writer.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use graphiti_client::{
    AddEpisodeRequest, EntityEdge, EntityNode, EpisodicNode, GraphitiClient, GraphitiError,
    GraphitiResult, SearchConfig, SearchResults,
};

/// Writer whose contents stay readable after the connection owns it
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One delegated call as seen by the stub
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    BuildIndices,
    AddEpisode(AddEpisodeRequest),
    Search { query: String, center: Option<String> },
    SearchWithConfig { query: String, limit: usize },
    Close,
}

/// Operation the stub should fail
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailOn {
    BuildIndices,
    AddEpisode,
    Search,
    SearchWithConfig,
    Close,
}

/// Client that records every call and answers with canned results
#[derive(Default)]
pub struct StubClient {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub edges: Vec<EntityEdge>,
    pub nodes: Vec<EntityNode>,
    pub fail_on: Option<FailOn>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edges(mut self, edges: Vec<EntityEdge>) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<EntityNode>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn failing(mut self, op: FailOn) -> Self {
        self.fail_on = Some(op);
        self
    }

    fn record(&self, call: Call, op: FailOn) -> GraphitiResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(op) {
            Err(GraphitiError::Search(format!("injected {:?} failure", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GraphitiClient for StubClient {
    async fn build_indices_and_constraints(&self) -> GraphitiResult<()> {
        self.record(Call::BuildIndices, FailOn::BuildIndices)
    }

    async fn add_episode(&self, request: AddEpisodeRequest) -> GraphitiResult<EpisodicNode> {
        self.record(Call::AddEpisode(request.clone()), FailOn::AddEpisode)?;
        Ok(EpisodicNode {
            uuid: format!("episode-{}", request.name),
            name: request.name,
            group_id: String::new(),
            source: request.source,
            source_description: request.source_description,
            content: request.episode_body,
            valid_at: request.reference_time,
            created_at: Utc::now(),
        })
    }

    async fn search(
        &self,
        query: &str,
        center_node_uuid: Option<&str>,
    ) -> GraphitiResult<Vec<EntityEdge>> {
        self.record(
            Call::Search {
                query: query.to_string(),
                center: center_node_uuid.map(str::to_string),
            },
            FailOn::Search,
        )?;
        Ok(self.edges.clone())
    }

    async fn search_with_config(
        &self,
        query: &str,
        config: &SearchConfig,
        _center_node_uuid: Option<&str>,
    ) -> GraphitiResult<SearchResults> {
        self.record(
            Call::SearchWithConfig {
                query: query.to_string(),
                limit: config.limit,
            },
            FailOn::SearchWithConfig,
        )?;
        Ok(SearchResults {
            edges: self.edges.clone(),
            nodes: self.nodes.clone(),
        })
    }

    async fn close(&self) -> GraphitiResult<()> {
        self.record(Call::Close, FailOn::Close)
    }
}

pub fn edge(uuid: &str, source: &str, fact: &str) -> EntityEdge {
    EntityEdge {
        uuid: uuid.to_string(),
        source_node_uuid: source.to_string(),
        target_node_uuid: "target".to_string(),
        name: "HOLDS_OFFICE".to_string(),
        fact: fact.to_string(),
        valid_at: None,
        invalid_at: None,
        created_at: Utc::now(),
        expired_at: None,
        episodes: Vec::new(),
        group_id: String::new(),
    }
}

pub fn node(uuid: &str, name: &str, summary: &str) -> EntityNode {
    EntityNode {
        uuid: uuid.to_string(),
        name: name.to_string(),
        group_id: String::new(),
        labels: vec!["Entity".to_string(), "Person".to_string()],
        summary: summary.to_string(),
        attributes: BTreeMap::new(),
        created_at: Utc::now(),
    }
}
