use crate::error::{Result, StudyError};
use crate::templates::{
    ASSESSMENT_PROMPT, ASSESSMENT_SOURCE, GROUNDING_GENERAL, GROUNDING_PAGE, TOPICS_PROMPT,
};
use pana_llm::{parse_braced, ChatClient};
use pana_types::{
    Assessment, AssessmentMeta, AssessmentQuestion, AssessmentRequest, LLMConfig, TopicList,
    TopicMeta, OPTIONS_PER_QUESTION,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_TOPIC: &str = "AI Native Software Development";
pub const DEFAULT_EXAM_TYPE: &str = "General Assessment";
pub const DEFAULT_EXPLANATION: &str = "Review the associated chapter to reinforce the concept.";
pub const MIN_TOPIC_CONTENT_CHARS: usize = 50;
/// Upper bound on questions per assessment
pub const MAX_QUESTIONS: usize = 50;

const MIN_PAGE_CONTENT_CHARS: usize = 100;
const MAX_PAGE_CONTENT_CHARS: usize = 6000;
const MAX_TOPIC_CONTENT_CHARS: usize = 8000;
const MAX_TOPICS: usize = 10;

/// Builds quizzes and topic lists from book pages
pub struct AssessmentGenerator {
    client: Arc<dyn ChatClient>,
    llm: LLMConfig,
}

impl AssessmentGenerator {
    pub fn new(client: Arc<dyn ChatClient>, llm: LLMConfig) -> Self {
        Self { client, llm }
    }

    /// Exactly `question_count` normalized questions, clamped to `1..=MAX_QUESTIONS`
    pub async fn generate_assessment(&self, request: AssessmentRequest) -> Result<Assessment> {
        let topic = non_blank(request.topic.as_deref()).unwrap_or(DEFAULT_TOPIC);
        let exam_type = non_blank(request.exam_type.as_deref()).unwrap_or(DEFAULT_EXAM_TYPE);
        let count = request.question_count.clamp(1, MAX_QUESTIONS);
        let page_content = request.page_content.as_deref().unwrap_or("");

        let source = if page_content.trim().chars().count() > MIN_PAGE_CONTENT_CHARS {
            let snippet: String = page_content.chars().take(MAX_PAGE_CONTENT_CHARS).collect();
            ASSESSMENT_SOURCE.replace("<content>", &snippet)
        } else {
            String::new()
        };
        let grounding = if page_content.is_empty() {
            GROUNDING_GENERAL
        } else {
            GROUNDING_PAGE
        };

        let prompt = ASSESSMENT_PROMPT
            .replace("<count>", &count.to_string())
            .replace("<exam_type>", exam_type)
            .replace("<topic>", topic)
            .replace("<difficulty>", &request.difficulty)
            .replace("<grounding>", grounding)
            .replace("<source>", &source);

        let reply = self
            .client
            .generate(&self.llm.model, &prompt)
            .await
            .map_err(StudyError::Llm)?;
        let payload: Value = parse_braced(&reply)?;

        let raw = payload
            .get("questions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        if raw.is_empty() {
            return Err(StudyError::EmptyResult(
                "The AI did not return any questions. Please try again.".to_string(),
            ));
        }
        if raw.len() != count {
            warn!(requested = count, returned = raw.len(), "question count mismatch");
        }

        let questions: Vec<AssessmentQuestion> = (0..count)
            .map(|i| match raw.get(i) {
                Some(q) => normalize_question(q, i),
                None => normalize_question(&Value::Null, i),
            })
            .collect();

        info!(questions = questions.len(), topic, "assessment generated");

        Ok(Assessment {
            questions,
            meta: AssessmentMeta {
                question_count: count,
                difficulty: request.difficulty,
                topic: topic.to_string(),
                exam_type: exam_type.to_string(),
                based_on_page_content: !page_content.is_empty(),
            },
        })
    }

    /// Up to ten topics covered by a page
    pub async fn extract_topics(&self, content: &str) -> Result<TopicList> {
        let content = content.trim();
        if content.chars().count() < MIN_TOPIC_CONTENT_CHARS {
            return Err(StudyError::Validation(
                "Content is too short to extract meaningful topics".to_string(),
            ));
        }

        let snippet: String = content.chars().take(MAX_TOPIC_CONTENT_CHARS).collect();
        let prompt = TOPICS_PROMPT.replace("<content>", &snippet);

        let reply = self
            .client
            .generate(&self.llm.model, &prompt)
            .await
            .map_err(StudyError::Llm)?;
        let payload: Value = parse_braced(&reply)?;

        let mut topics: Vec<String> = payload
            .get("topics")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if topics.is_empty() {
            return Err(StudyError::EmptyResult(
                "The AI could not extract any topics from the content".to_string(),
            ));
        }

        let total_topics = topics.len();
        topics.truncate(MAX_TOPICS);

        Ok(TopicList {
            topics,
            meta: TopicMeta {
                total_topics,
                content_length: content.chars().count(),
            },
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn placeholder_option(position: usize) -> String {
    format!("Option {}", (b'A' + position as u8) as char)
}

/// Coerce one model-produced question into the fixed four-option shape
fn normalize_question(raw: &Value, index: usize) -> AssessmentQuestion {
    let question = raw
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Question {}", index + 1));

    let mut options: Vec<String> = raw
        .get("options")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(OPTIONS_PER_QUESTION)
                .enumerate()
                .map(|(pos, item)| match item {
                    Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => placeholder_option(pos),
                })
                .collect()
        })
        .unwrap_or_default();
    while options.len() < OPTIONS_PER_QUESTION {
        options.push(placeholder_option(options.len()));
    }

    let answer_index = raw
        .get("answerIndex")
        .and_then(Value::as_u64)
        .map(|i| i as usize)
        .filter(|i| *i < OPTIONS_PER_QUESTION)
        .unwrap_or(0);

    let explanation = raw
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_EXPLANATION)
        .to_string();

    AssessmentQuestion {
        id: format!("q-{index}"),
        question,
        options,
        answer_index,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_question_is_kept() {
        let q = normalize_question(
            &json!({
                "question": " What is MCP? ",
                "options": ["A protocol", "A model", "A database", "A GPU"],
                "answerIndex": 0,
                "explanation": "It is a protocol."
            }),
            0,
        );
        assert_eq!(q.id, "q-0");
        assert_eq!(q.question, "What is MCP?");
        assert_eq!(q.options[3], "A GPU");
        assert_eq!(q.explanation, "It is a protocol.");
    }

    #[test]
    fn test_options_are_padded_and_truncated() {
        let short = normalize_question(&json!({"options": ["Yes", null]}), 2);
        assert_eq!(short.options, vec!["Yes", "Option B", "Option C", "Option D"]);
        assert_eq!(short.question, "Question 3");
        assert_eq!(short.explanation, DEFAULT_EXPLANATION);

        let long = normalize_question(&json!({"options": ["1", "2", "3", "4", "5"]}), 0);
        assert_eq!(long.options.len(), OPTIONS_PER_QUESTION);
    }

    #[test]
    fn test_answer_index_outside_range_defaults() {
        for bad in [json!(4), json!(-1), json!(1.5), json!("2"), Value::Null] {
            let q = normalize_question(&json!({"answerIndex": bad}), 0);
            assert_eq!(q.answer_index, 0);
        }
        let ok = normalize_question(&json!({"answerIndex": 3}), 0);
        assert_eq!(ok.answer_index, 3);
    }

    #[tokio::test]
    async fn test_huge_count_is_clamped() {
        let client = Arc::new(pana_llm::ScriptedClient::new().reply(
            r#"{"questions": [{"question": "Only one?", "options": ["a", "b", "c", "d"], "answerIndex": 1}]}"#,
        ));
        let generator = AssessmentGenerator::new(client.clone(), LLMConfig::default());

        let assessment = generator
            .generate_assessment(AssessmentRequest::new(usize::MAX))
            .await
            .unwrap();

        assert_eq!(assessment.questions.len(), MAX_QUESTIONS);
        assert_eq!(assessment.meta.question_count, MAX_QUESTIONS);
        assert!(client.prompts()[0].contains(&format!("exactly {MAX_QUESTIONS} ")));
    }

    #[test]
    fn test_non_object_question_becomes_placeholder() {
        let q = normalize_question(&json!("just text"), 4);
        assert_eq!(q.id, "q-4");
        assert_eq!(q.question, "Question 5");
        assert_eq!(q.options.len(), 4);
    }
}
