use crate::error::{Result, StudyError};
use crate::templates::EXPLANATION_PROMPT;
use chrono::Utc;
use once_cell::sync::Lazy;
use pana_llm::ChatClient;
use pana_persist::PersistenceClient;
use pana_types::{Explanation, LLMConfig, DEFAULT_EXPERIENCE};
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

static LEADING_HTML_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^html\s*").expect("static regex"));
static LEADING_HTML_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^```html\s*").expect("static regex"));
static TRAILING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\s*$").expect("static regex"));

/// Strip the wrappers models put around an HTML answer
pub fn clean_explanation(text: &str) -> String {
    let text = text.trim();
    let text = LEADING_HTML_WORD.replace(text, "");
    let text = LEADING_HTML_FENCE.replace(&text, "");
    let text = TRAILING_FENCE.replace(&text, "");
    text.trim().to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationOutcome {
    pub explanation: String,
    pub cached: bool,
}

/// Per-user page explanations tailored to the stated experience levels
pub struct ExplanationService {
    client: Arc<dyn ChatClient>,
    llm: LLMConfig,
    persist: Arc<dyn PersistenceClient>,
}

impl ExplanationService {
    pub fn new(client: Arc<dyn ChatClient>, llm: LLMConfig, persist: Arc<dyn PersistenceClient>) -> Self {
        Self { client, llm, persist }
    }

    pub async fn generate(
        &self,
        user_id: &str,
        page_path: &str,
        page_title: &str,
    ) -> Result<ExplanationOutcome> {
        if let Some(existing) = self
            .persist
            .find_explanation(user_id, page_path, page_title)
            .await?
        {
            debug!(user_id, page_path, "explanation cache hit");
            return Ok(ExplanationOutcome {
                explanation: existing.content,
                cached: true,
            });
        }

        let (ai_level, coding_level) = match self.persist.get_preferences(user_id).await? {
            Some(prefs) => (prefs.ai_experience, prefs.coding_experience),
            None => (DEFAULT_EXPERIENCE.to_string(), DEFAULT_EXPERIENCE.to_string()),
        };

        let prompt = EXPLANATION_PROMPT
            .replace("<ai_level>", &ai_level)
            .replace("<coding_level>", &coding_level)
            .replace("<title>", page_title);

        let reply = self
            .client
            .generate(&self.llm.model, &prompt)
            .await
            .map_err(StudyError::Llm)?;
        let content = clean_explanation(&reply);
        if content.is_empty() {
            return Err(StudyError::EmptyResult(
                "The AI returned an empty explanation. Please try again.".to_string(),
            ));
        }

        self.persist
            .save_explanation(Explanation {
                user_id: user_id.to_string(),
                page_path: page_path.to_string(),
                page_title: page_title.to_string(),
                content: content.clone(),
                ai_level,
                coding_level,
                created_at: Utc::now(),
            })
            .await?;
        info!(user_id, page_path, "explanation generated");

        Ok(ExplanationOutcome {
            explanation: content,
            cached: false,
        })
    }
}
