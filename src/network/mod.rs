//! HTTP networking module
//!
//! Provides the outbound HTTP client shared by the search and completion providers.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{HttpMethod, OutboundRequest, OutboundResponse};
