//! Sub-query planning: ask the LLM for searches and parse its reply

use super::backend::Backend;
use super::history::format_history;
use super::models::{ConversationEntry, SubQuery};
use super::prompts::planning_prompt;
use crate::config::PlannerSettings;
use crate::error::{AppError, AppResult, PlanParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?i:json)?\s*([\s\S]*?)\s*```").expect("valid fence pattern"));

/// Parse a planner reply into sub-queries.
///
/// If the text contains a fenced code block only its content is parsed.
pub fn parse_sub_queries(text: &str) -> Result<Vec<SubQuery>, PlanParseError> {
    let payload = FENCED_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();

    let value: Value = serde_json::from_str(payload)?;
    let items = value.as_array().ok_or(PlanParseError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let field = |name: &'static str| {
                item.get(name)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or(PlanParseError::InvalidEntry { index, field: name })
            };
            Ok(SubQuery {
                query: field("query")?,
                reason: field("reason")?,
            })
        })
        .collect()
}

pub struct Planner {
    settings: PlannerSettings,
    history_turns: usize,
}

impl Planner {
    pub fn new(settings: PlannerSettings, history_turns: usize) -> Self {
        Self {
            settings,
            history_turns,
        }
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.settings.retry_delay_ms)
    }

    /// Decompose `question` into an ordered list of searches.
    ///
    /// A failed parse is retried `max_retries` times with a fixed pause. Each
    /// retry re-parses the same reply unless `replan_on_retry` is set.
    pub async fn plan(
        &self,
        backend: &dyn Backend,
        question: &str,
        history: &[ConversationEntry],
    ) -> AppResult<Vec<SubQuery>> {
        let prompt = planning_prompt(question, &format_history(history, self.history_turns));
        let mut reply = backend
            .complete(&prompt, "")
            .await
            .map_err(AppError::into_upstream)?
            .response;

        let mut attempt = 1;
        loop {
            match parse_sub_queries(&reply) {
                Ok(sub_queries) => {
                    info!("Planned {} sub-queries on attempt {}", sub_queries.len(), attempt);
                    return Ok(sub_queries);
                }
                Err(e) if attempt > self.settings.max_retries => {
                    return Err(AppError::Planning {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Planner reply did not parse (attempt {}): {}", attempt, e);
                    debug!("Unparsed planner reply: {}", reply);
                    tokio::time::sleep(self.retry_delay()).await;
                    if self.settings.replan_on_retry {
                        reply = backend
                            .complete(&prompt, "")
                            .await
                            .map_err(AppError::into_upstream)?
                            .response;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
