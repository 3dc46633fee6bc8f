//! Multi-stage chat pipeline for the book assistant.
//!
//! A message first goes through the small-talk table. Anything else is
//! checked for tone while project context is looked up, structured into a
//! fixed schema, and finally answered by an [`AnswerAgent`].

pub mod answer;
pub mod builder;
pub mod search;
pub mod service;
pub mod small_talk;
pub mod structurer;
pub mod summary_request;
pub mod templates;
pub mod tone;

pub use answer::{Answer, AnswerAgent, AnswerRequest, LlmAnswerAgent};
pub use builder::ChatServiceBuilder;
pub use search::BrowserSearch;
pub use service::{ChatService, HISTORY_TURNS, SMALL_TALK_HANDLER};
pub use small_talk::{detect_small_talk, SmallTalkCategory};
pub use structurer::{QueryStructurer, StructuringContext};
pub use summary_request::is_summary_request;
pub use tone::{quick_tone_check, ToneClassifier, ESCALATION_THRESHOLD};
