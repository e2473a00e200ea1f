//! Search provider trait

use super::models::SearchResult;
use crate::network::{OutboundRequest, OutboundResponse};

/// A hosted web search API.
///
/// Providers only build requests and parse responses; the gateway owns the
/// HTTP client and performs the call.
pub trait SearchProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Build the HTTP request for a query
    fn request(&self, query: &str) -> anyhow::Result<OutboundRequest>;

    /// Parse the HTTP response into a normalized result
    fn response(&self, response: OutboundResponse) -> anyhow::Result<SearchResult>;
}
