use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pana_study::{DEFAULT_EXAM_TYPE, DEFAULT_TOPIC, MAX_QUESTIONS, MIN_TOPIC_CONTENT_CHARS};
use pana_types::{Assessment, AssessmentRequest, TopicList};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult, ResultExt};
use crate::state::AppState;

const DEFAULT_QUESTION_COUNT: usize = 5;
const DEFAULT_DIFFICULTY: &str = "medium";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAssessmentBody {
    pub question_count: Option<Value>,
    pub difficulty: Option<Value>,
    pub topic: Option<String>,
    pub exam_type: Option<String>,
    pub page_content: Option<String>,
}

/// Positive question count from a JSON number or numeric string
fn parse_question_count(value: Option<&Value>) -> Option<usize> {
    let count = match value {
        None | Some(Value::Null) => return Some(DEFAULT_QUESTION_COUNT),
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        Some(_) => return None,
    };
    (count.is_finite() && count > 0.0).then(|| count.trunc() as usize)
}

fn difficulty_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.to_lowercase(),
        Some(Value::Null) | None => DEFAULT_DIFFICULTY.to_string(),
        Some(other) => other.to_string().to_lowercase(),
    }
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateAssessmentBody>, JsonRejection>,
) -> ApiResult<Json<Assessment>> {
    let Json(body) = payload?;

    let count = parse_question_count(body.question_count.as_ref()).ok_or_else(|| {
        ApiError::BadRequest("questionCount must be a positive number".to_string())
    })?;
    if count > MAX_QUESTIONS {
        return Err(ApiError::BadRequest(format!(
            "questionCount must be at most {MAX_QUESTIONS}"
        )));
    }

    tracing::info!(
        count,
        has_page_content = body.page_content.is_some(),
        page_content_len = body.page_content.as_deref().map(str::len).unwrap_or(0),
        "generating assessment"
    );

    let mut request = AssessmentRequest::new(count)
        .with_difficulty(difficulty_label(body.difficulty.as_ref()))
        .with_topic(body.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string()))
        .with_exam_type(body.exam_type.unwrap_or_else(|| DEFAULT_EXAM_TYPE.to_string()));
    if let Some(content) = body.page_content {
        request = request.with_page_content(content);
    }

    let assessment = state
        .assessments
        .generate_assessment(request)
        .await
        .or_fail("Failed to generate assessment")?;

    Ok(Json(assessment))
}

#[derive(Debug, Deserialize)]
pub struct ExtractTopicsBody {
    #[serde(default)]
    pub content: Option<Value>,
}

pub async fn extract_topics(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractTopicsBody>, JsonRejection>,
) -> ApiResult<Json<TopicList>> {
    let Json(body) = payload?;

    let content = match body.content {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => {
            return Err(ApiError::BadRequest(
                "content is required and must be a string".to_string(),
            ))
        }
    };
    if content.trim().chars().count() < MIN_TOPIC_CONTENT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "content is too short (minimum {MIN_TOPIC_CONTENT_CHARS} characters)"
        )));
    }

    let topics = state
        .assessments
        .extract_topics(&content)
        .await
        .or_fail("Failed to extract topics")?;

    Ok(Json(topics))
}
