use crate::cache::IndexCache;
use crate::provider::ContextProvider;
use crate::rank::rank_files;
use crate::scan::{build_index, IndexError, IndexRoot, DEFAULT_ROOTS};
use async_trait::async_trait;
use pana_types::{ProjectContext, ProjectContextIndex};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

const INDEX_ERROR_SUMMARY: &str = "Error loading project context. Using general knowledge.";

/// Scans the book's project directories and answers keyword lookups
pub struct ContextIndexer {
    project_root: PathBuf,
    roots: Vec<IndexRoot>,
    cache: Arc<IndexCache>,
}

impl ContextIndexer {
    pub fn new(project_root: impl Into<PathBuf>, cache: Arc<IndexCache>) -> Self {
        Self {
            project_root: project_root.into(),
            roots: DEFAULT_ROOTS.to_vec(),
            cache,
        }
    }

    pub fn with_roots(mut self, roots: Vec<IndexRoot>) -> Self {
        self.roots = roots;
        self
    }

    pub fn cache(&self) -> &Arc<IndexCache> {
        &self.cache
    }

    /// Cached index, rebuilt on the blocking pool when stale
    pub async fn index(&self) -> Result<Arc<ProjectContextIndex>, IndexError> {
        if let Some(index) = self.cache.get() {
            return Ok(index);
        }

        let root = self.project_root.clone();
        let roots = self.roots.clone();
        let index = tokio::task::spawn_blocking(move || build_index(&root, &roots))
            .await
            .map_err(|e| IndexError::Task(e.to_string()))??;

        info!(files = index.len(), "indexed project files");
        Ok(self.cache.store(index))
    }
}

#[async_trait]
impl ContextProvider for ContextIndexer {
    async fn get_relevant_context(&self, query: &str) -> ProjectContext {
        match self.index().await {
            Ok(index) => rank_files(&index, query),
            Err(err) => {
                error!(error = %err, "failed to build project index");
                ProjectContext::empty(INDEX_ERROR_SUMMARY, 0)
            }
        }
    }
}
