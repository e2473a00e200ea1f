//! Dispatch seam between the orchestrator and the two gateways

use crate::error::{AppError, AppResult};
use crate::llm::{Completion, LlmGateway, LlmRequest};
use crate::network::{HttpClient, OutboundRequest, OutboundResponse};
use crate::search::{SearchGateway, SearchResult};
use async_trait::async_trait;
use axum::http::HeaderMap;
use url::Url;

pub const DEFAULT_PROTO: &str = "http";
pub const DEFAULT_HOST: &str = "localhost:3000";

/// What the orchestrator needs from the outside world
#[async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<SearchResult>;

    async fn complete(&self, query: &str, context: &str) -> AppResult<Completion>;
}

/// Direct calls to the injected gateways
pub struct Gateways {
    pub search: SearchGateway,
    pub llm: LlmGateway,
}

#[async_trait]
impl Backend for Gateways {
    async fn search(&self, query: &str) -> AppResult<SearchResult> {
        self.search.search(query).await
    }

    async fn complete(&self, query: &str, context: &str) -> AppResult<Completion> {
        self.llm.complete(query, context).await
    }
}

/// Public base address of this service, derived from the inbound request
pub fn base_address(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let proto = header("x-forwarded-proto").unwrap_or(DEFAULT_PROTO);
    let host = header("x-forwarded-host")
        .or_else(|| header("host"))
        .unwrap_or(DEFAULT_HOST);

    let candidate = format!("{}://{}", proto, host);
    match Url::parse(&candidate) {
        Ok(_) => candidate,
        Err(e) => {
            tracing::warn!("Unusable forwarded address {}: {}", candidate, e);
            format!("{}://{}", DEFAULT_PROTO, DEFAULT_HOST)
        }
    }
}

/// HTTP calls to this service's own `/api/search` and `/api/llm`
pub struct Loopback {
    client: HttpClient,
    base: String,
}

impl Loopback {
    pub fn new(client: HttpClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    async fn send(&self, request: OutboundRequest) -> AppResult<OutboundResponse> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;

        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| format!("HTTP error: {}", response.status));
            return Err(AppError::Upstream(message));
        }
        Ok(response)
    }
}

#[async_trait]
impl Backend for Loopback {
    async fn search(&self, query: &str) -> AppResult<SearchResult> {
        let request = OutboundRequest::get(self.endpoint("/api/search")).param("q", query);
        let response = self.send(request).await?;
        response.json().map_err(|e| AppError::upstream(e.to_string()))
    }

    async fn complete(&self, query: &str, context: &str) -> AppResult<Completion> {
        let body = serde_json::to_value(LlmRequest {
            query: query.to_string(),
            context: Some(context.to_string()),
        })
        .map_err(|e| AppError::upstream(e.to_string()))?;

        let request = OutboundRequest::post(self.endpoint("/api/llm")).json(body);
        let response = self.send(request).await?;
        response.json().map_err(|e| AppError::upstream(e.to_string()))
    }
}
