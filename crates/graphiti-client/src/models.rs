//! Data models for the graphiti client
//!
//! These types describe what goes into and comes out of the knowledge graph
//! and are shared by `Neo4jClient` and `EmbeddedClient`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::GraphitiError;

/// Kind of content carried by an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeType {
    /// Conversational turn, `speaker: text`
    Message,
    /// Structured JSON document
    Json,
    /// Free text
    Text,
}

impl EpisodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeType::Message => "message",
            EpisodeType::Json => "json",
            EpisodeType::Text => "text",
        }
    }
}

impl fmt::Display for EpisodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EpisodeType {
    type Err = GraphitiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "message" => Ok(EpisodeType::Message),
            "json" => Ok(EpisodeType::Json),
            "text" => Ok(EpisodeType::Text),
            other => Err(GraphitiError::Validation(format!("unknown episode type: {}", other))),
        }
    }
}

/// Arguments for a single `add_episode` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEpisodeRequest {
    /// Display name of the episode
    pub name: String,
    /// Episode body, already rendered as text
    pub episode_body: String,
    /// Content kind
    pub source: EpisodeType,
    /// Human-readable description of where the content came from
    pub source_description: String,
    /// Point in time the episode refers to
    pub reference_time: DateTime<Utc>,
}

/// An ingested episode as stored in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodicNode {
    pub uuid: String,
    pub name: String,
    pub group_id: String,
    pub source: EpisodeType,
    pub source_description: String,
    pub content: String,
    /// Reference time supplied at ingestion
    pub valid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A fact connecting two entity nodes.
///
/// `valid_at` / `invalid_at` bound the real-world validity of the fact;
/// either end may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEdge {
    pub uuid: String,
    pub source_node_uuid: String,
    pub target_node_uuid: String,
    /// Relationship label (e.g. "HOLDS_OFFICE")
    pub name: String,
    /// Natural-language fact
    pub fact: String,
    pub valid_at: Option<DateTime<Utc>>,
    pub invalid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expired_at: Option<DateTime<Utc>>,
    /// Uuids of the episodes that mention this fact
    #[serde(default)]
    pub episodes: Vec<String>,
    #[serde(default)]
    pub group_id: String,
}

/// A real-world entity (person, place, office)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub group_id: String,
    pub labels: Vec<String>,
    pub summary: String,
    /// Extra properties beyond the fixed schema
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Output of a configured search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub edges: Vec<EntityEdge>,
    pub nodes: Vec<EntityNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_type_names() {
        assert_eq!(EpisodeType::Text.to_string(), "text");
        assert_eq!(EpisodeType::Json.as_str(), "json");
        assert_eq!("MESSAGE".parse::<EpisodeType>().unwrap(), EpisodeType::Message);
        assert!("xml".parse::<EpisodeType>().is_err());
    }

    #[test]
    fn test_episode_type_serde() {
        let json = serde_json::to_string(&EpisodeType::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }

    #[test]
    fn test_entity_edge_optional_fields_default() {
        let edge: EntityEdge = serde_json::from_value(serde_json::json!({
            "uuid": "e1",
            "source_node_uuid": "a",
            "target_node_uuid": "b",
            "name": "HOLDS_OFFICE",
            "fact": "A holds office B",
            "valid_at": null,
            "invalid_at": null,
            "created_at": "2024-06-01T12:00:00Z",
            "expired_at": null
        }))
        .unwrap();

        assert!(edge.valid_at.is_none());
        assert!(edge.episodes.is_empty());
        assert_eq!(edge.group_id, "");
    }
}
