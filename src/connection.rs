//! Connection: console-reporting façade over a [`GraphitiClient`].
//!
//! Every operation makes one or two delegated calls and prints what came
//! back. Each operation writes its completion line whether or not the
//! delegated call failed; errors then propagate unchanged.

use std::io::{self, Write};

use chrono::Utc;
use graphiti_client::{
    AddEpisodeRequest, EntityEdge, EntityNode, GraphitiClient, Neo4jClient, SearchConfig,
};
use tracing::{debug, info};

use crate::config::Neo4jConfig;
use crate::episode::Episode;
use crate::error::ExampleResult;

/// Display names are `"{prefix} {index}"`
pub const EPISODE_NAME_PREFIX: &str = "Freakonomics Radio";

/// Characters of a node summary shown before it is cut
pub const SUMMARY_PREVIEW_CHARS: usize = 100;

/// First [`SUMMARY_PREVIEW_CHARS`] characters, with `...` appended when the
/// summary was longer.
pub fn summary_preview(summary: &str) -> String {
    match summary.char_indices().nth(SUMMARY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &summary[..cut]),
        None => summary.to_string(),
    }
}

fn attribute_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// An open client plus the writer that receives the console report.
///
/// `close` consumes the connection, so it runs at most once.
pub struct Connection<C: GraphitiClient> {
    client: C,
    out: Box<dyn Write + Send>,
}

impl Connection<Neo4jClient> {
    /// Validate the parameters, then open a Bolt connection.
    pub async fn connect(config: &Neo4jConfig) -> ExampleResult<Self> {
        config.check()?;
        let client = Neo4jClient::connect(&config.uri, &config.user, &config.password).await?;
        Ok(Self::with_client(client))
    }
}

impl<C: GraphitiClient> Connection<C> {
    /// Wrap an open client, reporting to stdout
    pub fn with_client(client: C) -> Self {
        Self::with_output(client, io::stdout())
    }

    /// Wrap an open client, reporting to `out`
    pub fn with_output(client: C, out: impl Write + Send + 'static) -> Self {
        Self {
            client,
            out: Box::new(out),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Write one line of the console report
    pub fn report(&mut self, line: &str) -> ExampleResult<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// Write the completion line, then hand back the operation's outcome.
    /// An operation error takes precedence over a failed write.
    fn finish<T>(&mut self, message: &str, outcome: ExampleResult<T>) -> ExampleResult<T> {
        let reported = self.report(message);
        let value = outcome?;
        reported?;
        Ok(value)
    }

    /// Ensure indices exist, then submit each episode in order.
    pub async fn ingest_episodes(&mut self, episodes: &[Episode]) -> ExampleResult<()> {
        let outcome = self.submit_episodes(episodes).await;
        self.finish("Saving Episodes Completed !!", outcome)
    }

    async fn submit_episodes(&mut self, episodes: &[Episode]) -> ExampleResult<()> {
        self.client.build_indices_and_constraints().await?;

        for (i, episode) in episodes.iter().enumerate() {
            let name = format!("{} {}", EPISODE_NAME_PREFIX, i);
            let request = AddEpisodeRequest {
                name: name.clone(),
                episode_body: episode.body()?,
                source: episode.source,
                source_description: episode.description.clone(),
                reference_time: Utc::now(),
            };
            let stored = self.client.add_episode(request).await?;
            debug!(uuid = %stored.uuid, name = %name, "episode ingested");
            self.report(&format!("Added episode: {} ({})", name, episode.source))?;
        }
        Ok(())
    }

    /// Search with the client's default combined ranking.
    pub async fn hybrid_search(&mut self, query: &str) -> ExampleResult<Vec<EntityEdge>> {
        let outcome = self.run_hybrid_search(query).await;
        self.finish("\nSearch Complete !!", outcome)
    }

    async fn run_hybrid_search(&mut self, query: &str) -> ExampleResult<Vec<EntityEdge>> {
        let results = self.client.search(query, None).await?;
        debug!(query, results = results.len(), "hybrid search");
        self.report("\nSearch Results:")?;
        self.print_edges(&results)?;
        Ok(results)
    }

    /// Rerun `query` anchored at the source node of the first prior result.
    ///
    /// Returns `None` without searching when `results` is empty.
    pub async fn center_node_search(
        &mut self,
        query: &str,
        results: &[EntityEdge],
    ) -> ExampleResult<Option<Vec<EntityEdge>>> {
        let outcome = self.run_center_node_search(query, results).await;
        self.finish("\nCenter Node Search Complete !!", outcome)
    }

    async fn run_center_node_search(
        &mut self,
        query: &str,
        results: &[EntityEdge],
    ) -> ExampleResult<Option<Vec<EntityEdge>>> {
        let Some(first) = results.first() else {
            self.report("No results found in the initial search to use as center node.")?;
            return Ok(None);
        };
        let center = first.source_node_uuid.as_str();

        self.report("\nReranking search results based on graph distance:")?;
        self.report(&format!("Using center node UUID: {}", center))?;

        let reranked = self.client.search(query, Some(center)).await?;
        debug!(query, center, results = reranked.len(), "center node search");
        self.report("\nReranked Search Results:")?;
        self.print_edges(&reranked)?;
        Ok(Some(reranked))
    }

    /// Node search driven by an explicit recipe instead of the default ranking.
    pub async fn node_search_by_recipe(
        &mut self,
        query: &str,
        config: &SearchConfig,
    ) -> ExampleResult<Vec<EntityNode>> {
        let outcome = self.run_node_search(query, config).await;
        self.finish("\nNode Search By Recipe Complete !!", outcome)
    }

    async fn run_node_search(
        &mut self,
        query: &str,
        config: &SearchConfig,
    ) -> ExampleResult<Vec<EntityNode>> {
        let found = self.client.search_with_config(query, config, None).await?;
        debug!(query, limit = config.limit, nodes = found.nodes.len(), "node search");
        self.report("\nNode Search Results:")?;
        for node in &found.nodes {
            self.print_node(node)?;
        }
        Ok(found.nodes)
    }

    /// Release the client.
    pub async fn close(mut self) -> ExampleResult<()> {
        self.client.close().await?;
        info!("connection closed");
        self.report("connection closed !!")
    }

    fn print_edges(&mut self, edges: &[EntityEdge]) -> ExampleResult<()> {
        for edge in edges {
            self.report(&format!("UUID: {}", edge.uuid))?;
            self.report(&format!("Fact: {}", edge.fact))?;
            if let Some(valid_at) = edge.valid_at {
                self.report(&format!("Valid from: {}", valid_at))?;
            }
            if let Some(invalid_at) = edge.invalid_at {
                self.report(&format!("Valid until: {}", invalid_at))?;
            }
            self.report("---")?;
        }
        Ok(())
    }

    fn print_node(&mut self, node: &EntityNode) -> ExampleResult<()> {
        self.report(&format!("Node UUID: {}", node.uuid))?;
        self.report(&format!("Node Name: {}", node.name))?;
        self.report(&format!("Content Summary: {}", summary_preview(&node.summary)))?;
        self.report(&format!("Node Labels: {}", node.labels.join(", ")))?;
        self.report(&format!("Created At: {}", node.created_at))?;
        if !node.attributes.is_empty() {
            self.report("Attributes:")?;
            for (key, value) in &node.attributes {
                self.report(&format!("  {}: {}", key, attribute_value(value)))?;
            }
        }
        self.report("---")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExampleError;

    #[test]
    fn test_summary_preview_short() {
        let summary = "a".repeat(100);
        assert_eq!(summary_preview(&summary), summary);
        assert_eq!(summary_preview(""), "");
    }

    #[test]
    fn test_summary_preview_long() {
        let summary = "b".repeat(101);
        let preview = summary_preview(&summary);
        assert_eq!(preview, format!("{}...", "b".repeat(100)));
    }

    #[test]
    fn test_summary_preview_counts_characters() {
        let summary = "é".repeat(150);
        let preview = summary_preview(&summary);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_attribute_value_unquotes_strings() {
        assert_eq!(attribute_value(&serde_json::json!("Governor")), "Governor");
        assert_eq!(attribute_value(&serde_json::json!(2019)), "2019");
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_password() {
        let config = Neo4jConfig {
            password: String::new(),
            ..Neo4jConfig::default()
        };
        let result = Connection::connect(&config).await;
        assert!(matches!(result, Err(ExampleError::Config(_))));
    }
}
