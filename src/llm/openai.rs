//! OpenAI-compatible chat completions provider

use super::models::{ChatMessage, Completion, Usage};
use super::provider::CompletionProvider;
use crate::config::LlmSettings;
use crate::network::{OutboundRequest, OutboundResponse};
use anyhow::Result as AnyhowResult;
use serde::{Deserialize, Serialize};

pub struct OpenAi {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_settings(&LlmSettings {
            api_key: Some(api_key.into()),
            ..Default::default()
        })
    }

    pub fn from_settings(settings: &LlmSettings) -> Self {
        Self {
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

impl CompletionProvider for OpenAi {
    fn name(&self) -> &str {
        "openai"
    }

    fn request(&self, messages: &[ChatMessage]) -> AnyhowResult<OutboundRequest> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is not configured"))?;

        let body = serde_json::to_value(ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })?;

        Ok(OutboundRequest::post(&self.endpoint).bearer(api_key).json(body))
    }

    fn response(&self, response: OutboundResponse) -> AnyhowResult<Completion> {
        if !response.is_success() {
            return Err(match response.error_message() {
                Some(message) => anyhow::anyhow!(message),
                None => anyhow::anyhow!("HTTP error: {}", response.status),
            });
        }

        let parsed: ChatResponse = response.json()?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("Completion returned no content"))?;

        Ok(Completion {
            response: text,
            model: parsed.model,
            usage: parsed.usage,
        })
    }
}
