use std::sync::Arc;

use anyhow::{anyhow, Result};
use pana_context::ContextProvider;
use pana_llm::ChatClient;
use pana_types::LLMConfig;

use crate::answer::{AnswerAgent, LlmAnswerAgent};
use crate::service::ChatService;
use crate::structurer::QueryStructurer;
use crate::tone::ToneClassifier;

/// Builder for a [`ChatService`]
///
/// The answer agent defaults to an [`LlmAnswerAgent`] over the same client.
pub struct ChatServiceBuilder {
    llm_client: Option<Arc<dyn ChatClient>>,
    context: Option<Arc<dyn ContextProvider>>,
    answer: Option<Arc<dyn AnswerAgent>>,
    config: LLMConfig,
}

impl ChatServiceBuilder {
    pub fn new() -> Self {
        Self {
            llm_client: None,
            context: None,
            answer: None,
            config: LLMConfig::default(),
        }
    }

    pub fn llm_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    pub fn context_provider(mut self, context: Arc<dyn ContextProvider>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn answer_agent(mut self, agent: Arc<dyn AnswerAgent>) -> Self {
        self.answer = Some(agent);
        self
    }

    pub fn config(mut self, config: LLMConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ChatService> {
        let client = self
            .llm_client
            .ok_or_else(|| anyhow!("LLM client is required"))?;
        let context = self
            .context
            .ok_or_else(|| anyhow!("context provider is required"))?;

        let answer: Arc<dyn AnswerAgent> = match self.answer {
            Some(agent) => agent,
            None => Arc::new(LlmAnswerAgent::new(client.clone(), self.config.clone())),
        };

        Ok(ChatService::new(
            context,
            ToneClassifier::new(client.clone(), self.config.clone()),
            QueryStructurer::new(client, self.config),
            answer,
        ))
    }
}

impl Default for ChatServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
