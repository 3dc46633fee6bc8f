//! Deterministic [`ChatClient`] used by tests and local development.

use crate::traits::{ChatClient, ChatRequest, ChatResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Replays queued replies in order, then falls back to an optional responder
///
/// Every prompt it receives is recorded and can be inspected with
/// [`ScriptedClient::prompts`].
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    responder: Option<Responder>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            responder: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failed call
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// Answer every call not covered by the queue with `f(prompt)`
    pub fn respond_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        self.responder = Some(Box::new(f));
        self
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }

    fn push(&self, entry: Result<String, String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(entry);
        }
    }
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let prompt = request.last_prompt().unwrap_or_default();
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }

        let queued = self
            .replies
            .lock()
            .map_err(|_| anyhow!("scripted client lock poisoned"))?
            .pop_front();

        let text = match queued {
            Some(Ok(text)) => text,
            Some(Err(message)) => return Err(anyhow!(message)),
            None => match &self.responder {
                Some(f) => f(&prompt)?,
                None => return Err(anyhow!("no scripted reply left")),
            },
        };

        Ok(ChatResponse {
            content: Some(text),
            usage: None,
            finish_reason: Some("STOP".to_string()),
            raw: serde_json::Value::Null,
        })
    }
}
