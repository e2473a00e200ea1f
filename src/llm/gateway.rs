//! LLM gateway: builds the two-message prompt and calls the provider

use super::models::{ChatMessage, Completion};
use super::provider::CompletionProvider;
use crate::error::{AppError, AppResult};
use crate::network::HttpClient;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Use the provided context to answer questions accurately.";

/// Build the fixed system + user prompt
pub fn build_messages(query: &str, context: &str) -> Vec<ChatMessage> {
    let context = if context.trim().is_empty() {
        "No context provided."
    } else {
        context
    };

    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("Context: {}\n\nQuestion: {}", context, query)),
    ]
}

pub struct LlmGateway {
    client: HttpClient,
    provider: Arc<dyn CompletionProvider>,
}

impl LlmGateway {
    pub fn new(client: HttpClient, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { client, provider }
    }

    /// Answer `query` using `context`
    pub async fn complete(&self, query: &str, context: &str) -> AppResult<Completion> {
        if query.trim().is_empty() {
            return Err(AppError::validation("Query is required"));
        }

        let start = Instant::now();
        let messages = build_messages(query, context);
        let request = self
            .provider
            .request(&messages)
            .map_err(|e| AppError::upstream(e.to_string()))?;

        let response = self.client.execute(request).await.map_err(|e| {
            error!("Completion request to {} failed: {}", self.provider.name(), e);
            AppError::upstream(e.to_string())
        })?;

        let completion = self.provider.response(response).map_err(|e| {
            error!("Completion provider {} returned an error: {}", self.provider.name(), e);
            AppError::upstream(e.to_string())
        })?;

        debug!(
            "Completion from {} used {} tokens in {:?}",
            completion.model,
            completion.usage.total_tokens,
            start.elapsed()
        );

        Ok(completion)
    }
}
