use crate::query::StructuredQuery;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_SESSION_TITLE: &str = "New Chat";
pub const GREETING: &str =
    "Hello! I'm your AI assistant for this book. Ask me anything about its chapters, code or concepts.";
const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Web,
}

/// Where an answer drew its material from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Source {
    pub fn file(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::File,
            path: Some(path.into()),
            title: Some(title.into()),
        }
    }

    pub fn web() -> Self {
        Self {
            kind: SourceKind::Web,
            path: None,
            title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    pub is_in_tone: bool,
    pub confidence: f64,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub used_browser_search: bool,
}

/// A single chat message; never mutated after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::create(text.into(), false, None)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::create(text.into(), true, None)
    }

    /// Bot message carrying the orchestrator's verdict
    pub fn from_reply(reply: &ChatReply) -> Self {
        Self::create(
            reply.message.clone(),
            true,
            Some(MessageMetadata {
                is_in_tone: reply.is_in_tone,
                confidence: reply.confidence,
                sources: reply.sources.clone(),
                used_browser_search: reply.metadata.used_browser_search.unwrap_or(false),
            }),
        )
    }

    fn create(text: String, is_bot: bool, metadata: Option<MessageMetadata>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            is_bot,
            timestamp: Utc::now(),
            metadata,
        }
    }

    pub fn to_turn(&self) -> ConversationTurn {
        ConversationTurn {
            text: self.text.clone(),
            is_bot: self.is_bot,
        }
    }
}

/// History entry as sent by the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub text: String,
    #[serde(default)]
    pub is_bot: bool,
}

impl ConversationTurn {
    pub fn speaker(&self) -> &'static str {
        if self.is_bot {
            "Assistant"
        } else {
            "User"
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Fresh session titled "New Chat" that opens with a bot greeting
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            messages: vec![ChatMessage::bot(GREETING)],
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message, deriving the title from the first user message
    pub fn push(&mut self, message: ChatMessage) {
        if !message.is_bot && self.title == DEFAULT_SESSION_TITLE {
            self.title = derive_title(&message.text);
        }
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    /// The last `limit` messages in wire form, greeting included
    pub fn history(&self, limit: usize) -> Vec<ConversationTurn> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages[skip..].iter().map(ChatMessage::to_turn).collect()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_title(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() > TITLE_MAX_CHARS {
        let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMetadata {
    /// Serialized as `null` when the query was never structured
    pub structured_query: Option<StructuredQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_browser_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handled_by: Option<String>,
}

/// Outcome of one chat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub is_in_tone: bool,
    pub confidence: f64,
    pub sources: Vec<Source>,
    pub metadata: ReplyMetadata,
}
