//! Error taxonomy shared by the gateways and the agent endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Reasons a planner reply could not be turned into sub-queries
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("invalid JSON in planner reply: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("planner reply is not a JSON array")]
    NotAnArray,
    #[error("sub-query {index} is missing a string `{field}` field")]
    InvalidEntry { index: usize, field: &'static str },
}

/// Errors surfaced by the HTTP endpoints
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field was missing or empty
    #[error("{0}")]
    Validation(String),
    /// The search or completion provider failed
    #[error("{0}")]
    Upstream(String),
    /// The planner reply never parsed
    #[error("failed to plan sub-queries after {attempts} attempts: {source}")]
    Planning {
        attempts: u32,
        #[source]
        source: PlanParseError,
    },
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Reclassify a downstream validation failure as an upstream one.
    ///
    /// Used by the orchestrator: once the inbound request is accepted, any
    /// gateway failure is a pipeline failure.
    pub fn into_upstream(self) -> Self {
        match self {
            Self::Validation(msg) => Self::Upstream(msg),
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Planning { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
