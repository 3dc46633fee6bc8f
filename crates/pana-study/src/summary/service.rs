use crate::error::{Result, StudyError};
use crate::summary::cache::SummaryCache;
use crate::templates::{SUMMARY_BULLETED, SUMMARY_LONG, SUMMARY_PROMPT, SUMMARY_SHORT};
use once_cell::sync::Lazy;
use pana_llm::ChatClient;
use pana_types::{LLMConfig, SummaryRecord, SummarySize};
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\w*\n").expect("static regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("static regex"));

/// Drop code-fence markers and collapse runs of blank lines
pub fn clean_markdown(text: &str) -> String {
    let text = FENCE_OPEN.replace_all(text, "");
    let text = text.replace("```", "");
    BLANK_RUN.replace_all(&text, "\n\n").trim().to_string()
}

fn size_instruction(size: SummarySize) -> String {
    let words = size.word_target().unwrap_or_default().to_string();
    match size {
        SummarySize::Bulleted => SUMMARY_BULLETED.to_string(),
        SummarySize::Short => SUMMARY_SHORT.replace("<words>", &words),
        SummarySize::Long => SUMMARY_LONG.replace("<words>", &words),
    }
}

/// Serves cached summaries and generates missing ones from the page source
pub struct SummaryService {
    client: Arc<dyn ChatClient>,
    llm: LLMConfig,
    project_root: PathBuf,
    cache: SummaryCache,
}

impl SummaryService {
    pub fn new(
        client: Arc<dyn ChatClient>,
        llm: LLMConfig,
        project_root: impl Into<PathBuf>,
        cache: SummaryCache,
    ) -> Self {
        Self {
            client,
            llm,
            project_root: project_root.into(),
            cache,
        }
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// Cached summary text, unmodified
    pub async fn get_summary(&self, page_path: &str, size: SummarySize) -> Result<Option<String>> {
        Ok(self
            .cache
            .load(page_path, size)
            .await?
            .map(|record| record.summary))
    }

    /// Cached summary if present, otherwise generate and persist one
    pub async fn generate_summary(
        &self,
        page_path: &str,
        page_title: &str,
        size: SummarySize,
    ) -> Result<String> {
        if let Some(summary) = self.get_summary(page_path, size).await? {
            return Ok(summary);
        }

        let source_path = self.project_root.join(page_path);
        let content = tokio::fs::read_to_string(&source_path)
            .await
            .map_err(|source| StudyError::SourceUnavailable {
                path: source_path.clone(),
                source,
            })?;

        let prompt = SUMMARY_PROMPT
            .replace("<instruction>", &size_instruction(size))
            .replace("<title>", page_title)
            .replace("<content>", &content);

        let reply = self
            .client
            .generate(&self.llm.model, &prompt)
            .await
            .map_err(StudyError::Llm)?;
        let summary = clean_markdown(&reply);
        if summary.is_empty() {
            return Err(StudyError::EmptyResult(
                "The AI returned an empty summary. Please try again.".to_string(),
            ));
        }

        let record = SummaryRecord::new(page_path, summary.as_str(), size);
        let path = self.cache.store(&record).await?;
        info!(page = page_path, %size, path = %path.display(), "summary generated");

        Ok(summary)
    }
}
