//! Answer orchestration: plan, search each sub-query, synthesize a cited answer

use super::backend::Backend;
use super::context::{single_shot_context, sub_query_block};
use super::history::format_history;
use super::models::{AgentAnswer, AgentRequest, Source, SubQuery};
use super::planner::Planner;
use super::prompts::{decomposed_answer_prompt, single_shot_prompt};
use crate::config::{AgentMode, AgentSettings};
use crate::error::{AppError, AppResult};
use tracing::{debug, info};

pub struct Orchestrator {
    planner: Planner,
    settings: AgentSettings,
}

impl Orchestrator {
    pub fn new(settings: AgentSettings) -> Self {
        Self {
            planner: Planner::new(settings.planner.clone(), settings.history_turns),
            settings,
        }
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Answer a question. Every call to `backend` is awaited in order and
    /// any failure aborts the whole request.
    pub async fn answer(&self, backend: &dyn Backend, request: AgentRequest) -> AppResult<AgentAnswer> {
        request.validate()?;
        let question = request.query.trim();

        match request.mode.unwrap_or(self.settings.mode) {
            AgentMode::Decompose => self.decompose(backend, question, &request).await,
            AgentMode::SingleShot => self.single_shot(backend, question, &request).await,
        }
    }

    async fn decompose(
        &self,
        backend: &dyn Backend,
        question: &str,
        request: &AgentRequest,
    ) -> AppResult<AgentAnswer> {
        let sub_queries = self.planner.plan(backend, question, &request.history).await?;
        let context = self.gather(backend, &sub_queries).await?;

        let history = format_history(&request.history, self.settings.history_turns);
        let prompt = decomposed_answer_prompt(question, &history, &sub_queries);
        let completion = backend
            .complete(&prompt, &context)
            .await
            .map_err(AppError::into_upstream)?;

        info!(
            "Answered '{}' from {} sub-queries ({} tokens)",
            question,
            sub_queries.len(),
            completion.usage.total_tokens
        );

        Ok(AgentAnswer {
            answer: completion.response,
            sources: sub_query_sources(&sub_queries),
            is_markdown: true,
        })
    }

    /// Search each sub-query in order and concatenate their context blocks
    async fn gather(&self, backend: &dyn Backend, sub_queries: &[SubQuery]) -> AppResult<String> {
        let mut context = String::new();
        for (i, sub) in sub_queries.iter().enumerate() {
            debug!("Searching sub-query {}: {}", i + 1, sub.query);
            let result = backend
                .search(&sub.query)
                .await
                .map_err(AppError::into_upstream)?;
            context.push_str(&sub_query_block(
                i + 1,
                sub,
                &result,
                self.settings.results_per_sub_query,
            ));
        }
        Ok(context)
    }

    async fn single_shot(
        &self,
        backend: &dyn Backend,
        question: &str,
        request: &AgentRequest,
    ) -> AppResult<AgentAnswer> {
        let limit = self.settings.single_shot_results;
        let result = backend
            .search(question)
            .await
            .map_err(AppError::into_upstream)?;
        let context = single_shot_context(&result, limit);

        let history = format_history(&request.history, self.settings.history_turns);
        let completion = backend
            .complete(&single_shot_prompt(question, &history), &context)
            .await
            .map_err(AppError::into_upstream)?;

        let sources = result
            .top(limit)
            .iter()
            .enumerate()
            .map(|(i, r)| Source {
                title: r.title.clone(),
                link: r.link.clone(),
                number: r.number.map(|n| n as usize).unwrap_or(i + 1),
            })
            .collect();

        Ok(AgentAnswer {
            answer: completion.response,
            sources,
            is_markdown: true,
        })
    }
}

/// One synthetic citation per sub-query, numbered from 1
fn sub_query_sources(sub_queries: &[SubQuery]) -> Vec<Source> {
    sub_queries
        .iter()
        .enumerate()
        .map(|(i, sub)| Source {
            title: format!("Sub-query: {}", sub.query),
            link: "#".to_string(),
            number: i + 1,
        })
        .collect()
}
