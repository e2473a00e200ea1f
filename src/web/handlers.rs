//! HTTP request handlers

use super::state::AppState;
use crate::agent::{base_address, AgentAnswer, AgentRequest, Backend, Loopback};
use crate::config::Dispatch;
use crate::error::{AppError, AppResult};
use crate::llm::{Completion, LlmRequest};
use crate::search::SearchResult;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use tracing::Instrument;
use uuid::Uuid;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> Response {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("history_turns", &state.settings.agent.history_turns);
    render(&state, "index.html", &ctx)
}

/// LLM test page handler
pub async fn llm_page(State(state): State<AppState>) -> Response {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    render(&state, "llm.html", &ctx)
}

fn render(state: &AppState, template: &str, ctx: &Context) -> Response {
    match state.templates.render_with_context(template, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// `GET /api/search?q=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResult>> {
    let query = params.q.unwrap_or_default();
    let result = state.gateways.search.search(&query).await?;
    Ok(Json(result))
}

/// A missing `query` decodes as empty and is reported by validation, so a
/// rejection here means the body itself was unusable.
fn rejected_body(rejection: JsonRejection) -> AppError {
    AppError::validation(rejection.body_text())
}

/// `POST /api/llm`
pub async fn llm(
    State(state): State<AppState>,
    body: Result<Json<LlmRequest>, JsonRejection>,
) -> AppResult<Json<Completion>> {
    let Json(request) = body.map_err(rejected_body)?;
    let context = request.context.unwrap_or_default();
    let completion = state.gateways.llm.complete(&request.query, &context).await?;
    Ok(Json(completion))
}

/// `POST /api/agent`
pub async fn agent(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<AgentRequest>, JsonRejection>,
) -> AppResult<Json<AgentAnswer>> {
    let Json(request) = body.map_err(rejected_body)?;
    request.validate()?;

    let backend: Arc<dyn Backend> = match state.settings.agent.dispatch {
        Dispatch::InProcess => state.gateways.clone(),
        Dispatch::Loopback => Arc::new(Loopback::new(state.client.clone(), base_address(&headers))),
    };

    let span = tracing::info_span!("agent", request_id = %Uuid::new_v4());
    async move {
        tracing::info!("Agent query: {}", request.query);
        let answer = state.orchestrator.answer(backend.as_ref(), request).await?;
        Ok::<_, AppError>(Json(answer))
    }
    .instrument(span)
    .await
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Robots.txt handler
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let content = if state.is_public() {
        "User-agent: *\nAllow: /\nDisallow: /api/\n"
    } else {
        "User-agent: *\nDisallow: /\n"
    };
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain")],
        content,
    )
}

/// Favicon handler
pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
