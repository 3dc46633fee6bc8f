use axum::{extract::State, Json};
use pana_types::UserSummary;
use std::sync::Arc;

use crate::auth::AdminAuth;
use crate::error::{ApiResult, ResultExt};
use crate::state::AppState;

/// Every registered account, sanitized
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let users = state
        .persist
        .list_users()
        .await
        .or_fail("Internal Server Error")?;
    Ok(Json(users))
}
