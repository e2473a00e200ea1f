//! Normalized search result types

use serde::{Deserialize, Deserializer, Serialize};

/// A normalized search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Ranked organic hits; always present, possibly empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organic_results: Vec<OrganicResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_searches: Option<Vec<RelatedSearch>>,
}

impl SearchResult {
    /// The knowledge-graph description, if one is present and non-empty
    pub fn knowledge_description(&self) -> Option<&str> {
        self.knowledge_graph
            .as_ref()
            .and_then(|kg| kg.description.as_deref())
            .filter(|d| !d.trim().is_empty())
    }

    /// The first `n` organic results
    pub fn top(&self, n: usize) -> &[OrganicResult] {
        &self.organic_results[..n.min(self.organic_results.len())]
    }
}

/// A single organic (non-sponsored) hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    /// Provider rank (`position` in SerpApi payloads)
    #[serde(default, alias = "position", skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl OrganicResult {
    pub fn new(title: impl Into<String>, link: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            number: None,
        }
    }
}

/// Structured summary panel for an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A related query suggested by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedSearch {
    #[serde(default)]
    pub query: String,
}

/// Treat an explicit `null` array the same as a missing one
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
