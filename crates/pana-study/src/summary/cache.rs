use crate::error::Result;
use crate::summary::key::summary_file_name;
use pana_types::{SummaryRecord, SummarySize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Flat-file store of one JSON record per (page, size)
#[derive(Debug, Clone)]
pub struct SummaryCache {
    dir: PathBuf,
}

impl SummaryCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, page_path: &str, size: SummarySize) -> Result<PathBuf> {
        Ok(self.dir.join(summary_file_name(page_path, size)?))
    }

    /// Cached record, or `None` when the file is missing, unreadable or corrupt
    pub async fn load(&self, page_path: &str, size: SummarySize) -> Result<Option<SummaryRecord>> {
        let path = self.path_for(page_path, size)?;

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "summary cache miss");
                return Ok(None);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable summary cache file");
                return Ok(None);
            }
        };

        match serde_json::from_str::<SummaryRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt summary cache file");
                Ok(None)
            }
        }
    }

    /// Write a record, creating the cache directory on demand
    pub async fn store(&self, record: &SummaryRecord) -> Result<PathBuf> {
        let path = self.path_for(&record.page_path, record.size)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let body = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&path, body).await?;
        debug!(path = %path.display(), "summary cached");
        Ok(path)
    }
}
