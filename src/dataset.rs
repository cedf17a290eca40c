//! Fixed demonstration data.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use graphiti_client::{EntityEdge, EntityNode};
use serde_json::json;

use crate::episode::Episode;

/// Hybrid search question, reused for the center-node rerank
pub const ATTORNEY_GENERAL_QUERY: &str = "Who was the California Attorney General?";

/// Node search question
pub const GOVERNOR_QUERY: &str = "California Governor";

/// Result limit for the node search recipe
pub const NODE_SEARCH_LIMIT: usize = 5;

/// Two transcript snippets about the Attorney General and two metadata
/// records about the Governor.
pub fn episodes() -> Vec<Episode> {
    vec![
        Episode::text(
            "Kamala Harris is the Attorney General of California. She was previously \
             the district attorney for San Francisco.",
            "podcast transcript",
        ),
        Episode::text(
            "As AG, Harris was in office from January 3, 2011 – January 3, 2017",
            "podcast transcript",
        ),
        Episode::json(
            json!({
                "name": "Gavin Newsom",
                "position": "Governor",
                "state": "California",
                "previous_role": "Lieutenant Governor",
                "previous_location": "San Francisco"
            }),
            "podcast metadata",
        ),
        Episode::json(
            json!({
                "name": "Gavin Newsom",
                "position": "Governor",
                "term_start": "January 7, 2019",
                "term_end": "Present"
            }),
            "podcast metadata",
        ),
    ]
}

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn entity(uuid: &str, name: &str, summary: &str, attributes: &[(&str, &str)]) -> EntityNode {
    EntityNode {
        uuid: uuid.to_string(),
        name: name.to_string(),
        group_id: String::new(),
        labels: vec!["Entity".to_string()],
        summary: summary.to_string(),
        attributes: attributes
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect::<BTreeMap<_, _>>(),
        created_at: Utc::now(),
    }
}

fn fact(
    uuid: &str,
    source: &str,
    target: &str,
    name: &str,
    fact: &str,
    valid_at: Option<DateTime<Utc>>,
    invalid_at: Option<DateTime<Utc>>,
) -> EntityEdge {
    EntityEdge {
        uuid: uuid.to_string(),
        source_node_uuid: source.to_string(),
        target_node_uuid: target.to_string(),
        name: name.to_string(),
        fact: fact.to_string(),
        valid_at,
        invalid_at,
        created_at: Utc::now(),
        expired_at: None,
        episodes: Vec::new(),
        group_id: String::new(),
    }
}

/// Entities and facts the episodes describe, for seeding the in-process
/// graph, which does no extraction of its own.
pub fn seed_graph() -> (Vec<EntityNode>, Vec<EntityEdge>) {
    let nodes = vec![
        entity("kamala-harris", "Kamala Harris", "Attorney General of California from 2011 to 2017", &[]),
        entity(
            "gavin-newsom",
            "Gavin Newsom",
            "Governor of California since 2019, previously Lieutenant Governor",
            &[("position", "Governor"), ("state", "California")],
        ),
        entity("california", "California", "US state", &[]),
        entity("san-francisco", "San Francisco", "City in California", &[]),
    ];

    let edges = vec![
        fact(
            "harris-attorney-general",
            "kamala-harris",
            "california",
            "ATTORNEY_GENERAL_OF",
            "Kamala Harris was the Attorney General of California",
            date(2011, 1, 3),
            date(2017, 1, 3),
        ),
        fact(
            "harris-district-attorney",
            "kamala-harris",
            "san-francisco",
            "DISTRICT_ATTORNEY_OF",
            "Kamala Harris was the district attorney for San Francisco",
            None,
            date(2011, 1, 3),
        ),
        fact(
            "newsom-governor",
            "gavin-newsom",
            "california",
            "GOVERNOR_OF",
            "Gavin Newsom is the Governor of California",
            date(2019, 1, 7),
            None,
        ),
        fact(
            "newsom-lieutenant-governor",
            "gavin-newsom",
            "california",
            "LIEUTENANT_GOVERNOR_OF",
            "Gavin Newsom was the Lieutenant Governor of California",
            None,
            date(2019, 1, 7),
        ),
    ];

    (nodes, edges)
}
