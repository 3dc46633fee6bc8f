pub mod assessment;
pub mod chat;
pub mod config;
pub mod context;
pub mod query;
pub mod summary;
pub mod tone;
pub mod user;

pub use assessment::{
    Assessment, AssessmentMeta, AssessmentQuestion, AssessmentRequest, TopicList, TopicMeta,
    OPTIONS_PER_QUESTION,
};
pub use chat::{
    ChatMessage, ChatReply, ChatSession, ConversationTurn, MessageMetadata, ReplyMetadata, Source,
    SourceKind,
};
pub use config::LLMConfig;
pub use context::{ContextFile, IndexedFile, ProjectContext, ProjectContextIndex};
pub use query::{Complexity, Intent, ResponseType, StructuredQuery};
pub use summary::{SummaryRecord, SummarySize, UnknownSize};
pub use tone::ToneResult;
pub use user::{Explanation, UserPreferences, UserSummary, DEFAULT_EXPERIENCE};
