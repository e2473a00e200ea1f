//! askweb: a search-and-summarize answer service
//!
//! A question is decomposed into web searches, the results are assembled into
//! a bounded context, and an LLM writes a cited markdown answer.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod network;
pub mod search;
pub mod web;

pub use agent::{AgentAnswer, AgentRequest, Orchestrator, SubQuery};
pub use config::Settings;
pub use error::{AppError, AppResult};
pub use search::SearchResult;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
