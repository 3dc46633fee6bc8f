use pana_llm::ParseError;
use pana_persist::PersistError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("{0}")]
    Validation(String),

    #[error("AI request failed: {0}")]
    Llm(anyhow::Error),

    #[error("Could not parse AI response: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    EmptyResult(String),

    #[error("Failed to read file {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub type Result<T> = std::result::Result<T, StudyError>;
