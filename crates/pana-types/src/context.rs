use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scanned project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedFile {
    /// `{root label}/{path relative to the root}`
    pub path: String,
    pub title: String,
    /// Leading characters of the file, bounded by the indexer
    pub content: String,
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContextIndex {
    pub files: Vec<IndexedFile>,
    pub last_updated: DateTime<Utc>,
}

impl ProjectContextIndex {
    pub fn new(files: Vec<IndexedFile>) -> Self {
        Self {
            files,
            last_updated: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A ranked match inside a [`ProjectContext`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextFile {
    pub path: String,
    pub title: String,
    pub score: u32,
}

/// Project material relevant to one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub summary: String,
    pub content: String,
    pub files: Vec<ContextFile>,
    pub total_files: usize,
}

impl ProjectContext {
    /// Context with a summary line and nothing else
    pub fn empty(summary: impl Into<String>, total_files: usize) -> Self {
        Self {
            summary: summary.into(),
            content: String::new(),
            files: Vec::new(),
            total_files,
        }
    }
}
