//! Search gateway: validates the query and makes a single provider call

use super::models::SearchResult;
use super::provider::SearchProvider;
use crate::error::{AppError, AppResult};
use crate::network::HttpClient;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

pub struct SearchGateway {
    client: HttpClient,
    provider: Arc<dyn SearchProvider>,
}

impl SearchGateway {
    pub fn new(client: HttpClient, provider: Arc<dyn SearchProvider>) -> Self {
        Self { client, provider }
    }

    /// Search the web for `query`. No retry and no caching.
    pub async fn search(&self, query: &str) -> AppResult<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Query parameter \"q\" is required"));
        }

        let start = Instant::now();
        let request = self
            .provider
            .request(query)
            .map_err(|e| AppError::upstream(e.to_string()))?;

        let response = self.client.execute(request).await.map_err(|e| {
            error!("Search request to {} failed: {}", self.provider.name(), e);
            AppError::upstream(e.to_string())
        })?;

        let result = self.provider.response(response).map_err(|e| {
            error!("Search provider {} returned an error: {}", self.provider.name(), e);
            AppError::upstream(e.to_string())
        })?;

        debug!(
            "Search '{}' returned {} organic results in {:?}",
            query,
            result.organic_results.len(),
            start.elapsed()
        );

        Ok(result)
    }
}
