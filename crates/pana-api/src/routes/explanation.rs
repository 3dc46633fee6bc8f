use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pana_study::ExplanationOutcome;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::SessionUser;
use crate::error::{ApiError, ApiResult, ResultExt};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationBody {
    pub page_title: Option<String>,
    pub page_path: Option<String>,
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    payload: Result<Json<ExplanationBody>, JsonRejection>,
) -> ApiResult<Json<ExplanationOutcome>> {
    let Json(body) = payload?;
    let (Some(page_title), Some(page_path)) = (body.page_title, body.page_path) else {
        return Err(ApiError::BadRequest(
            "pageTitle and pagePath are required".to_string(),
        ));
    };

    let outcome = state
        .explanations
        .generate(&user_id, &page_path, &page_title)
        .await
        .or_fail("Failed to generate explanation")?;

    Ok(Json(outcome))
}
