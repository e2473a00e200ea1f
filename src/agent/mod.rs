//! Agent module
//!
//! Drives the search-and-summarize pipeline: sub-query planning, sequential
//! searches, context assembly and the final cited completion.

mod backend;
mod context;
mod history;
mod models;
mod orchestrator;
mod planner;
mod prompts;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{base_address, Backend, Gateways, Loopback};
pub use context::{single_shot_context, sub_query_block};
pub use history::format_history;
pub use models::*;
pub use orchestrator::Orchestrator;
pub use planner::{parse_sub_queries, Planner};
