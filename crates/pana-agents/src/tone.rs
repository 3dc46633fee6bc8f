use crate::templates::TONE_PROMPT;
use pana_llm::{parse_fenced, ChatClient};
use pana_types::{LLMConfig, ProjectContext, ToneResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Quick-check confidence below which the chat pipeline asks the LLM
pub const ESCALATION_THRESHOLD: f64 = 0.7;

/// Quick-check confidence at which the full check skips the LLM
const QUICK_ACCEPT: f64 = 0.8;
const IN_TONE_ABOVE: f64 = 0.3;
const CONFIDENCE_FLOOR: f64 = 0.1;
const KEYWORD_POINTS: f64 = 2.0;
const TOPIC_POINTS: f64 = 4.0;

const DEFAULT_VERDICT_CONFIDENCE: f64 = 0.7;
const DEFAULT_VERDICT_REASONING: &str = "Analyzed using AI model";

pub const DOMAIN_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "agent",
    "agentic",
    "python",
    "typescript",
    "spec-driven",
    "specification",
    "development",
    "programming",
    "code",
    "gemini",
    "claude",
    "openai",
    "mcp",
    "model context protocol",
    "docusaurus",
    "documentation",
    "book",
    "chapter",
    "tutorial",
    "api",
    "backend",
    "frontend",
    "react",
    "node",
    "express",
    "docker",
    "kubernetes",
    "deployment",
    "architecture",
    "prompt",
    "context",
    "engineering",
    "co-learning",
    "colearning",
];

pub const DOMAIN_TOPICS: &[&str] = &[
    "ai-driven development",
    "ai-native development",
    "python programming",
    "typescript programming",
    "spec-driven development",
    "agentic ai systems",
    "openai agents sdk",
    "google gemini",
    "mcp protocol",
    "realtime agents",
    "voice agents",
    "containerization",
    "event-driven architecture",
];

/// Rule-based domain check, no I/O
///
/// Keywords score 2 points and topic phrases 4, normalized by 30% of the
/// keyword vocabulary. The reported confidence never drops below 0.1.
pub fn quick_tone_check(query: &str) -> ToneResult {
    let query = query.to_lowercase();

    let keyword_hits = DOMAIN_KEYWORDS.iter().filter(|k| query.contains(*k)).count();
    let topic_hits = DOMAIN_TOPICS.iter().filter(|t| query.contains(*t)).count();

    let points = keyword_hits as f64 * KEYWORD_POINTS + topic_hits as f64 * TOPIC_POINTS;
    let confidence = (points / (DOMAIN_KEYWORDS.len() as f64 * 0.3)).min(1.0);

    ToneResult::new(
        confidence > IN_TONE_ABOVE,
        confidence.max(CONFIDENCE_FLOOR),
        format!(
            "Quick check: {keyword_hits} keyword and {topic_hits} topic matches found"
        ),
    )
}

/// Tone check that falls back to an LLM verdict for uncertain queries
pub struct ToneClassifier {
    client: Arc<dyn ChatClient>,
    llm: LLMConfig,
}

impl ToneClassifier {
    pub fn new(client: Arc<dyn ChatClient>, llm: LLMConfig) -> Self {
        Self { client, llm }
    }

    pub fn quick_check(&self, query: &str) -> ToneResult {
        quick_tone_check(query)
    }

    /// Full check: keep a confident quick result, else ask the model once
    pub async fn classify(&self, query: &str, context: &ProjectContext) -> ToneResult {
        let quick = quick_tone_check(query);
        if quick.confidence >= QUICK_ACCEPT {
            return quick;
        }

        let prompt = TONE_PROMPT
            .replace("<context>", &context.summary)
            .replace("<query>", query);

        let reply = match self.client.generate(&self.llm.model, &prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "tone model call failed, using quick check");
                return quick;
            }
        };

        match parse_fenced::<Value>(&reply) {
            Ok(Value::Object(verdict)) => {
                let result = ToneResult::new(
                    verdict
                        .get("isInTone")
                        .and_then(Value::as_bool)
                        .unwrap_or(true),
                    verdict
                        .get("confidence")
                        .and_then(Value::as_f64)
                        .unwrap_or(DEFAULT_VERDICT_CONFIDENCE),
                    verdict
                        .get("reasoning")
                        .and_then(Value::as_str)
                        .filter(|r| !r.trim().is_empty())
                        .unwrap_or(DEFAULT_VERDICT_REASONING),
                );
                debug!(in_tone = result.is_in_tone, confidence = result.confidence, "tone verdict");
                result
            }
            Ok(_) => {
                warn!("tone verdict was not a JSON object, using quick check");
                quick
            }
            Err(err) => {
                warn!(error = %err, "unparsable tone verdict, using quick check");
                quick
            }
        }
    }
}
