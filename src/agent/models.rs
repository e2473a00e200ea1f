//! Agent request and answer types

use crate::config::AgentMode;
use crate::error::{AppError, AppResult};
use crate::search::null_as_empty;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A decomposed search and why it is needed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuery {
    pub query: String,
    pub reason: String,
}

impl SubQuery {
    pub fn new(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            reason: reason.into(),
        }
    }
}

/// Display-only citation record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub title: String,
    pub link: String,
    pub number: usize,
}

/// Body returned by `POST /api/agent`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentAnswer {
    pub answer: String,
    pub sources: Vec<Source>,
    pub is_markdown: bool,
}

/// A prior turn replayed by the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationEntry {
    pub query: String,
    pub results: AgentAnswer,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// RFC 3339 text or epoch milliseconds; anything else is dropped
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    })
}

impl ConversationEntry {
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: AgentAnswer {
                answer: answer.into(),
                sources: Vec::new(),
                is_markdown: true,
            },
            timestamp: Some(Utc::now()),
        }
    }
}

/// Body of `POST /api/agent`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentRequest {
    pub query: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub history: Vec<ConversationEntry>,
    /// Overrides the configured mode for this request
    pub mode: Option<AgentMode>,
}

impl AgentRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.query.trim().is_empty() {
            return Err(AppError::validation("Query is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_uses_camel_case() {
        let answer = AgentAnswer {
            answer: "a".to_string(),
            sources: vec![],
            is_markdown: true,
        };
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["isMarkdown"], true);
    }

    #[test]
    fn test_browser_history_shape() {
        let body = r#"{
            "query": "and its population?",
            "history": [{
                "query": "capital of France",
                "results": {"answer": "**Paris**", "sources": [{"title": "Paris", "link": "https://x"}], "isMarkdown": true},
                "timestamp": "2024-05-01T12:00:00.000Z"
            }],
            "mode": "single_shot"
        }"#;
        let request: AgentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.history[0].results.sources[0].number, 0);
        assert!(request.history[0].timestamp.is_some());
        assert_eq!(request.mode, Some(AgentMode::SingleShot));
    }

    #[test]
    fn test_lenient_history_fields() {
        let request: AgentRequest =
            serde_json::from_str(r#"{"query": "capital of France", "history": null}"#).unwrap();
        assert!(request.history.is_empty());

        let body = r#"{
            "query": "and its population?",
            "history": [
                {"query": "a", "results": {"answer": "x"}, "timestamp": 1715000000000},
                {"query": "b", "results": {"answer": "y"}, "timestamp": "yesterday"},
                {"query": "c", "results": {"answer": "z"}, "timestamp": null}
            ]
        }"#;
        let request: AgentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.history.len(), 3);
        assert_eq!(
            request.history[0].timestamp.map(|t| t.timestamp_millis()),
            Some(1715000000000)
        );
        assert!(request.history[1].timestamp.is_none());
        assert!(request.history[2].timestamp.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(AgentRequest::new("  ").validate().is_err());
        assert!(AgentRequest::new("why is the sky blue").validate().is_ok());
    }
}
