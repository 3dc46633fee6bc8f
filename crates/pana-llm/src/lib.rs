pub mod types;
pub mod traits;
pub mod config;
pub mod gemini;
pub mod parse;
pub mod scripted;

pub use traits::{ChatClient, ChatRequest, ChatResponse, ChatOptions, TokenUsage};
pub use config::{ClientFactory, GeminiConfig, ProviderConfig, ProviderType};
pub use gemini::{GeminiClient, DEFAULT_MODEL};
pub use parse::{parse_braced, parse_fenced, strip_code_fence, ParseError};
pub use scripted::ScriptedClient;
pub use types::{Content, ContentPart, Message};
