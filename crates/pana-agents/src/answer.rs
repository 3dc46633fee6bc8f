use crate::search::BrowserSearch;
use crate::service::HISTORY_TURNS;
use crate::templates::{ANSWER_MODE_CHAT, ANSWER_MODE_OUT_OF_TONE, ANSWER_MODE_SUMMARY, ANSWER_PROMPT};
use anyhow::{bail, Result};
use async_trait::async_trait;
use pana_llm::{ChatClient, ChatOptions, ChatRequest, Message};
use pana_types::{ConversationTurn, LLMConfig, ProjectContext, Source, StructuredQuery, ToneResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the pipeline knows about a message by the time it is answered
#[derive(Debug, Clone, Copy)]
pub struct AnswerRequest<'a> {
    pub query: &'a str,
    pub structured_query: &'a StructuredQuery,
    pub tone: &'a ToneResult,
    pub project_context: &'a ProjectContext,
    pub conversation_history: &'a [ConversationTurn],
    pub is_summary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<Source>,
    pub used_browser_search: bool,
}

/// Final stage of the chat pipeline
#[async_trait]
pub trait AnswerAgent: Send + Sync {
    async fn answer(&self, request: AnswerRequest<'_>) -> Result<Answer>;
}

/// Answers with one model call, consulting [`BrowserSearch`] for off-topic queries
pub struct LlmAnswerAgent {
    client: Arc<dyn ChatClient>,
    llm: LLMConfig,
    search: BrowserSearch,
    history_turns: usize,
}

impl LlmAnswerAgent {
    pub fn new(client: Arc<dyn ChatClient>, llm: LLMConfig) -> Self {
        Self {
            search: BrowserSearch::new(client.clone(), llm.clone()),
            client,
            llm,
            history_turns: HISTORY_TURNS,
        }
    }

    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns;
        self
    }

    fn render_history(&self, history: &[ConversationTurn]) -> String {
        let skip = history.len().saturating_sub(self.history_turns);
        let lines: Vec<String> = history[skip..]
            .iter()
            .map(|turn| format!("{}: {}", turn.speaker(), turn.text))
            .collect();
        if lines.is_empty() {
            "(none)".to_string()
        } else {
            lines.join("\n")
        }
    }
}

#[async_trait]
impl AnswerAgent for LlmAnswerAgent {
    async fn answer(&self, request: AnswerRequest<'_>) -> Result<Answer> {
        let use_search = !request.tone.is_in_tone && !request.is_summary;

        let external = if use_search {
            info!("query out of tone, running browser search");
            let notes = self.search.search(request.query).await;
            format!("\nExternal notes:\n{notes}\n")
        } else {
            String::new()
        };

        let mode = if request.is_summary {
            ANSWER_MODE_SUMMARY
        } else if use_search {
            ANSWER_MODE_OUT_OF_TONE
        } else {
            ANSWER_MODE_CHAT
        };

        let structured = request.structured_query;
        let intent = serde_json::to_string(&structured.intent)?;
        let complexity = serde_json::to_string(&structured.complexity)?;
        let response_type = serde_json::to_string(&structured.expected_response_type)?;

        let prompt = ANSWER_PROMPT
            .replace("<mode>", mode)
            .replace("<context>", &request.project_context.summary)
            .replace("<external>", &external)
            .replace("<history>", &self.render_history(request.conversation_history))
            .replace("<intent>", intent.trim_matches('"'))
            .replace("<complexity>", complexity.trim_matches('"'))
            .replace("<response_type>", response_type.trim_matches('"'))
            .replace("<keywords>", &structured.keywords.join(", "))
            .replace("<query>", request.query);

        let mut options = ChatOptions::new();
        if let Some(temp) = self.llm.temperature {
            options = options.temperature(temp);
        }
        if let Some(max_tokens) = self.llm.max_tokens {
            options = options.max_tokens(max_tokens);
        }

        let response = self
            .client
            .chat(ChatRequest::new(&self.llm.model, vec![Message::human(prompt)]).with_options(options))
            .await?;

        let text = response.text().trim().to_string();
        if text.is_empty() {
            bail!("model returned an empty answer");
        }
        debug!(chars = text.len(), used_browser_search = use_search, "answer generated");

        let mut sources: Vec<Source> = request
            .project_context
            .files
            .iter()
            .map(|f| Source::file(&f.path, &f.title))
            .collect();
        if use_search {
            sources.push(Source::web());
        }

        Ok(Answer {
            text,
            sources,
            used_browser_search: use_search,
        })
    }
}
