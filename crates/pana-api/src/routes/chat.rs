use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pana_types::{ChatReply, ConversationTurn};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult, ResultExt};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// Run one chat turn through the orchestration pipeline
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(req) = payload?;

    let message = match req.message {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => {
            return Err(ApiError::BadRequest(
                "Message is required and must be a string".to_string(),
            ))
        }
    };

    let reply = state
        .chat
        .process_message(&message, &req.conversation_history)
        .await
        .or_fail("Failed to process message")?;

    Ok(Json(reply))
}
