//! In-memory backend for orchestration tests

use super::backend::Backend;
use crate::error::{AppError, AppResult};
use crate::llm::{Completion, Usage};
use crate::search::{OrganicResult, SearchResult};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Scripted completions and canned search results, recording every call
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<AppResult<String>>>,
    results: HashMap<String, AppResult<SearchResult>>,
    pub searches: Mutex<Vec<String>>,
    /// `(query, context)` of each completion call
    pub completions: Mutex<Vec<(String, String)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn failing_reply(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(AppError::upstream(message)));
        self
    }

    pub fn result(mut self, query: &str, result: SearchResult) -> Self {
        self.results.insert(query.to_string(), Ok(result));
        self
    }

    pub fn failing_search(mut self, query: &str, message: &str) -> Self {
        self.results
            .insert(query.to_string(), Err(AppError::upstream(message)));
        self
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn completion_count(&self) -> usize {
        self.completions.lock().unwrap().len()
    }

    pub fn last_completion(&self) -> (String, String) {
        self.completions.lock().unwrap().last().cloned().unwrap()
    }
}

/// `n` organic results titled `<prefix> 1..n`
pub fn organic(prefix: &str, n: usize) -> SearchResult {
    SearchResult {
        organic_results: (1..=n)
            .map(|i| {
                OrganicResult::new(
                    format!("{} {}", prefix, i),
                    format!("https://example.com/{}/{}", prefix.replace(' ', "-"), i),
                    format!("About {} {}", prefix, i),
                )
            })
            .collect(),
        ..Default::default()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn search(&self, query: &str) -> AppResult<SearchResult> {
        self.searches.lock().unwrap().push(query.to_string());
        if query.trim().is_empty() {
            return Err(AppError::validation("Query parameter \"q\" is required"));
        }
        match self.results.get(query) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(e)) => Err(AppError::upstream(e.to_string())),
            None => Ok(SearchResult::default()),
        }
    }

    async fn complete(&self, query: &str, context: &str) -> AppResult<Completion> {
        self.completions
            .lock()
            .unwrap()
            .push((query.to_string(), context.to_string()));
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::upstream("no scripted reply")));
        next.map(|response| Completion {
            response,
            model: "fake-model".to_string(),
            usage: Usage::default(),
        })
    }
}
