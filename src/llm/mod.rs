//! LLM gateway module
//!
//! Wraps the hosted chat-completion provider behind a fixed prompt shape.

mod gateway;
mod models;
mod openai;
mod provider;

pub use gateway::{build_messages, LlmGateway, SYSTEM_PROMPT};
pub use models::*;
pub use openai::OpenAi;
pub use provider::CompletionProvider;
