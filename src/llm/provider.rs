//! Completion provider trait

use super::models::{ChatMessage, Completion};
use crate::network::{OutboundRequest, OutboundResponse};

/// A hosted chat-completion API
pub trait CompletionProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Build the HTTP request for a prompt
    fn request(&self, messages: &[ChatMessage]) -> anyhow::Result<OutboundRequest>;

    /// Parse the HTTP response into a completion
    fn response(&self, response: OutboundResponse) -> anyhow::Result<Completion>;
}
