//! Assembly of the textual context passed to the final completion

use super::models::SubQuery;
use crate::search::{OrganicResult, SearchResult};

pub const BLOCK_SEPARATOR: &str = "---";

/// Context block for the `n`th (1-based) sub-query.
///
/// Source labels restart at 1 within each block.
pub fn sub_query_block(n: usize, sub: &SubQuery, result: &SearchResult, limit: usize) -> String {
    let mut out = format!("Sub-query {}: {}\nReason: {}\n\n", n, sub.query, sub.reason);
    push_knowledge_graph(&mut out, result);
    push_sources(&mut out, result.top(limit));
    out.push_str(BLOCK_SEPARATOR);
    out.push_str("\n\n");
    out
}

/// Context for a search of the raw question
pub fn single_shot_context(result: &SearchResult, limit: usize) -> String {
    let mut out = String::new();
    push_knowledge_graph(&mut out, result);
    push_sources(&mut out, result.top(limit));
    out
}

fn push_knowledge_graph(out: &mut String, result: &SearchResult) {
    if let Some(description) = result.knowledge_description() {
        out.push_str(&format!("Knowledge Graph:\n{}\n\n", description));
    }
}

fn push_sources(out: &mut String, results: &[OrganicResult]) {
    out.push_str("Search Results:\n");
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "[Source {}] {}\n{}\nURL: {}\n\n",
            i + 1,
            result.title,
            result.snippet,
            result.link
        ));
    }
}
