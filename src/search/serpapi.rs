//! SerpApi search provider implementation

use super::models::SearchResult;
use super::provider::SearchProvider;
use crate::config::SearchSettings;
use crate::network::{OutboundRequest, OutboundResponse};
use anyhow::Result as AnyhowResult;

/// SerpApi JSON search
pub struct SerpApi {
    base_url: String,
    engine: String,
    location: Option<String>,
    api_key: Option<String>,
}

impl SerpApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_settings(&SearchSettings {
            api_key: Some(api_key.into()),
            ..Default::default()
        })
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            engine: settings.engine.clone(),
            location: settings.location.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
        }
    }
}

impl SearchProvider for SerpApi {
    fn name(&self) -> &str {
        "serpapi"
    }

    fn request(&self, query: &str) -> AnyhowResult<OutboundRequest> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("SERP_API_KEY is not configured"))?;

        let mut request = OutboundRequest::get(&self.base_url)
            .param("engine", &self.engine)
            .param("api_key", api_key)
            .param("q", query);

        if let Some(ref location) = self.location {
            request = request.param("location", location);
        }

        Ok(request)
    }

    fn response(&self, response: OutboundResponse) -> AnyhowResult<SearchResult> {
        // SerpApi reports failures as {"error": "..."}, sometimes with a 200
        if let Some(message) = response.error_message() {
            return Err(anyhow::anyhow!(message));
        }
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        response.json()
    }
}
