use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use aria_types::ConversationTurn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const MAX_MESSAGE_CHARS: usize = 4_000;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub turns: Vec<ConversationTurn>,
}

pub(crate) fn validate_message(message: &str) -> ApiResult<()> {
    if message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "message exceeds {} characters",
            MAX_MESSAGE_CHARS
        )));
    }
    Ok(())
}

/// One conversational reply; a fallback reply is still a 200
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    validate_message(&req.message)?;

    let outcome = state.coach.chat(&user_id, &req.message).await;

    Ok(Json(ChatResponse {
        fallback: outcome.is_fallback(),
        error: outcome.error().map(|e| e.kind().to_string()),
        reply: outcome.into_value(),
    }))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let limit = query.limit.min(state.coach.sessions().config().memory_window);
    Json(HistoryResponse {
        turns: state.coach.history(&user_id, limit).await,
    })
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .coach
        .clear_history(&user_id)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}
