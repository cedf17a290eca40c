//! Example episodes as handed to the connection for ingestion.

use graphiti_client::EpisodeType;
use serde_json::Value;

use crate::error::ExampleResult;

/// Episode payload
#[derive(Debug, Clone, PartialEq)]
pub enum EpisodeContent {
    /// Free text, submitted unchanged
    Text(String),
    /// Key/value record, submitted as JSON text
    Structured(Value),
}

/// One unit of input content.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub content: EpisodeContent,
    pub source: EpisodeType,
    pub description: String,
}

impl Episode {
    /// Plain-text episode
    pub fn text(content: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            content: EpisodeContent::Text(content.into()),
            source: EpisodeType::Text,
            description: description.into(),
        }
    }

    /// Structured episode; `content` is usually a JSON object
    pub fn json(content: Value, description: impl Into<String>) -> Self {
        Self {
            content: EpisodeContent::Structured(content),
            source: EpisodeType::Json,
            description: description.into(),
        }
    }

    /// Body text submitted to the graph.
    pub fn body(&self) -> ExampleResult<String> {
        match &self.content {
            EpisodeContent::Text(text) => Ok(text.clone()),
            EpisodeContent::Structured(Value::String(text)) => Ok(text.clone()),
            EpisodeContent::Structured(value) => Ok(serde_json::to_string(value)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_body_unchanged() {
        let episode = Episode::text("Kamala Harris is the Attorney General.", "podcast transcript");
        assert_eq!(episode.body().unwrap(), "Kamala Harris is the Attorney General.");
        assert_eq!(episode.source, EpisodeType::Text);
    }

    #[test]
    fn test_structured_body_is_json() {
        let episode = Episode::json(
            json!({"name": "Gavin Newsom", "position": "Governor"}),
            "podcast metadata",
        );
        let body = episode.body().unwrap();

        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["name"], "Gavin Newsom");
        assert_eq!(parsed["position"], "Governor");
        assert_eq!(episode.source, EpisodeType::Json);
    }

    #[test]
    fn test_structured_string_passes_through() {
        let episode = Episode::json(Value::String("already text".to_string()), "raw");
        assert_eq!(episode.body().unwrap(), "already text");
    }
}
