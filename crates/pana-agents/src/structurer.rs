use crate::templates::{DEFAULT_PROJECT_DESCRIPTION, STRUCTURING_PROMPT};
use pana_llm::{parse_fenced, ChatClient};
use pana_types::{LLMConfig, StructuredQuery};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

/// Classifier signals passed along with the query
#[derive(Debug, Clone)]
pub struct StructuringContext {
    pub is_in_tone: bool,
    pub confidence: f64,
    pub project_context: String,
    pub is_summary: bool,
}

/// Converts a free-text message into a [`StructuredQuery`]
pub struct QueryStructurer {
    client: Arc<dyn ChatClient>,
    llm: LLMConfig,
}

impl QueryStructurer {
    pub fn new(client: Arc<dyn ChatClient>, llm: LLMConfig) -> Self {
        Self { client, llm }
    }

    /// Always yields all six fields; missing or invalid values take defaults
    pub async fn structure(&self, query: &str, ctx: &StructuringContext) -> StructuredQuery {
        let project_context = if ctx.project_context.trim().is_empty() {
            DEFAULT_PROJECT_DESCRIPTION
        } else {
            ctx.project_context.as_str()
        };

        let prompt = STRUCTURING_PROMPT
            .replace("<is_in_tone>", &ctx.is_in_tone.to_string())
            .replace("<confidence>", &ctx.confidence.to_string())
            .replace("<is_summary>", &ctx.is_summary.to_string())
            .replace("<context>", project_context)
            .replace("<query>", query);

        let reply = match self.client.generate(&self.llm.model, &prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "structuring call failed, using defaults");
                return StructuredQuery::fallback_for(query);
            }
        };

        match parse_fenced::<Value>(&reply) {
            Ok(Value::Object(fields)) => from_fields(&fields),
            Ok(_) => {
                warn!("structured query was not a JSON object, using defaults");
                StructuredQuery::fallback_for(query)
            }
            Err(err) => {
                warn!(error = %err, "unparsable structured query, using defaults");
                StructuredQuery::fallback_for(query)
            }
        }
    }
}

fn from_fields(fields: &Map<String, Value>) -> StructuredQuery {
    let defaults = StructuredQuery::default();
    StructuredQuery {
        intent: enum_field(fields, "intent").unwrap_or(defaults.intent),
        topics: string_list(fields, "topics"),
        keywords: string_list(fields, "keywords"),
        requires_context: fields
            .get("requiresContext")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.requires_context),
        complexity: enum_field(fields, "complexity").unwrap_or(defaults.complexity),
        expected_response_type: enum_field(fields, "expectedResponseType")
            .unwrap_or(defaults.expected_response_type),
    }
}

fn enum_field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key)?.as_str()?.trim().to_lowercase();
    serde_json::from_value(Value::String(value)).ok()
}

fn string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
