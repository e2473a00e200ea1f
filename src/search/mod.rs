//! Search gateway module
//!
//! Wraps the hosted search provider and normalizes its responses.

mod gateway;
mod models;
mod provider;
mod serpapi;

pub use gateway::SearchGateway;
pub use models::*;
pub(crate) use models::null_as_empty;
pub use provider::SearchProvider;
pub use serpapi::SerpApi;
