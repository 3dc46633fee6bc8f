pub mod assessment;
pub mod error;
pub mod explanation;
pub mod summary;
pub mod templates;

pub use assessment::{
    AssessmentGenerator, DEFAULT_EXAM_TYPE, DEFAULT_EXPLANATION, DEFAULT_TOPIC, MAX_QUESTIONS,
    MIN_TOPIC_CONTENT_CHARS,
};
pub use error::{Result, StudyError};
pub use explanation::{clean_explanation, ExplanationOutcome, ExplanationService};
pub use summary::{clean_markdown, summary_file_name, validate_page_path, SummaryCache, SummaryService};
