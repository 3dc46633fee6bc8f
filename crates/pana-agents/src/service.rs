use crate::answer::{AnswerAgent, AnswerRequest};
use crate::small_talk::{detect_small_talk, SmallTalkCategory};
use crate::structurer::{QueryStructurer, StructuringContext};
use crate::summary_request::is_summary_request;
use crate::tone::{ToneClassifier, ESCALATION_THRESHOLD};
use anyhow::Result;
use pana_context::ContextProvider;
use pana_types::{ChatReply, ConversationTurn, ReplyMetadata};
use std::sync::Arc;
use tracing::{debug, info};

pub const SMALL_TALK_HANDLER: &str = "chatService.smallTalk";

/// Turns of history the front-end is expected to send
pub const HISTORY_TURNS: usize = 10;

/// Orchestrates one chat turn end to end
///
/// Built with [`crate::ChatServiceBuilder`].
pub struct ChatService {
    context: Arc<dyn ContextProvider>,
    tone: ToneClassifier,
    structurer: QueryStructurer,
    answer: Arc<dyn AnswerAgent>,
}

impl ChatService {
    pub(crate) fn new(
        context: Arc<dyn ContextProvider>,
        tone: ToneClassifier,
        structurer: QueryStructurer,
        answer: Arc<dyn AnswerAgent>,
    ) -> Self {
        Self {
            context,
            tone,
            structurer,
            answer,
        }
    }

    pub async fn process_message(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<ChatReply> {
        let trimmed = message.trim();

        if let Some(category) = detect_small_talk(trimmed) {
            debug!(?category, "small talk short-circuit");
            return Ok(small_talk_reply(category));
        }

        let is_summary = is_summary_request(trimmed);

        let (project_context, quick) = tokio::join!(
            self.context.get_relevant_context(trimmed),
            async { self.tone.quick_check(trimmed) }
        );

        let tone = if quick.confidence < ESCALATION_THRESHOLD && !is_summary {
            self.tone.classify(message, &project_context).await
        } else {
            quick
        };
        debug!(
            in_tone = tone.is_in_tone,
            confidence = tone.confidence,
            is_summary,
            "tone resolved"
        );

        let structured = self
            .structurer
            .structure(
                trimmed,
                &StructuringContext {
                    is_in_tone: tone.is_in_tone,
                    confidence: tone.confidence,
                    project_context: project_context.summary.clone(),
                    is_summary,
                },
            )
            .await;

        let answer = self
            .answer
            .answer(AnswerRequest {
                query: trimmed,
                structured_query: &structured,
                tone: &tone,
                project_context: &project_context,
                conversation_history: history,
                is_summary,
            })
            .await?;

        info!(
            sources = answer.sources.len(),
            used_browser_search = answer.used_browser_search,
            "chat turn answered"
        );

        Ok(ChatReply {
            message: answer.text,
            is_in_tone: tone.is_in_tone,
            confidence: tone.confidence,
            sources: answer.sources,
            metadata: ReplyMetadata {
                structured_query: Some(structured),
                used_browser_search: Some(answer.used_browser_search),
                handled_by: None,
            },
        })
    }
}

fn small_talk_reply(category: SmallTalkCategory) -> ChatReply {
    ChatReply {
        message: category.pick_reply().to_string(),
        is_in_tone: true,
        confidence: 1.0,
        sources: Vec::new(),
        metadata: ReplyMetadata {
            structured_query: None,
            used_browser_search: None,
            handled_by: Some(SMALL_TALK_HANDLER.to_string()),
        },
    }
}
