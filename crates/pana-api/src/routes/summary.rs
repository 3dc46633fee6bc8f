use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Query, State},
    Json,
};
use pana_types::SummarySize;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult, ResultExt};
use crate::state::AppState;

fn parse_size(size: Option<&str>) -> ApiResult<SummarySize> {
    match size.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|e: pana_types::UnknownSize| ApiError::BadRequest(e.to_string())),
        None => Ok(SummarySize::default()),
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> ApiResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{name} is required")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckQuery {
    pub page_path: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub exists: bool,
    pub summary: Option<String>,
}

/// Cached summary lookup; never calls the model
pub async fn check(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CheckQuery>, QueryRejection>,
) -> ApiResult<Json<CheckResponse>> {
    let Query(query) = query?;
    let page_path = required(&query.page_path, "pagePath")?;
    let size = parse_size(query.size.as_deref())?;

    let summary = state
        .summaries
        .get_summary(page_path, size)
        .await
        .or_fail("Failed to check summary")?;

    Ok(Json(CheckResponse {
        exists: summary.is_some(),
        summary,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    pub page_path: Option<String>,
    pub page_title: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub summary: String,
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> ApiResult<Json<GenerateResponse>> {
    let Json(body) = payload?;
    let page_path = required(&body.page_path, "pagePath")?;
    let page_title = required(&body.page_title, "pageTitle")?;
    let size = parse_size(body.size.as_deref())?;

    let summary = state
        .summaries
        .generate_summary(page_path, page_title, size)
        .await
        .or_fail("Failed to generate summary")?;

    Ok(Json(GenerateResponse { summary }))
}
