use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pana_persist::{ProfileUpdate, UpsertOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{MaybeSessionUser, SessionUser};
use crate::error::{ApiResult, ResultExt};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PersonalizationStatus {
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

/// Whether the signed-in user finished the experience questionnaire
pub async fn check_personalization(
    State(state): State<Arc<AppState>>,
    MaybeSessionUser(user): MaybeSessionUser,
) -> Json<PersonalizationStatus> {
    let completed = match user {
        Some(user_id) => state.persist.check_personalization(&user_id).await,
        None => false,
    };
    Json(PersonalizationStatus { completed })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesBody {
    #[serde(default)]
    pub ai_experience: String,
    #[serde(default)]
    pub coding_experience: String,
}

pub async fn save_preferences(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    payload: Result<Json<PreferencesBody>, JsonRejection>,
) -> ApiResult<Json<Success>> {
    let Json(body) = payload?;

    let outcome = state
        .persist
        .upsert_preferences(&user_id, &body.ai_experience, &body.coding_experience)
        .await
        .or_fail("Failed to save preferences")?;

    tracing::info!(
        user_id = %user_id,
        created = outcome == UpsertOutcome::Created,
        "preferences saved"
    );
    Ok(Json(Success { success: true }))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Json<Success>> {
    let Json(update) = payload?;

    state
        .persist
        .update_profile(&user_id, update)
        .await
        .or_fail("Failed to update profile")?;

    tracing::info!(user_id = %user_id, "profile updated");
    Ok(Json(Success { success: true }))
}
