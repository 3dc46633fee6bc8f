use std::sync::Arc;
use std::time::Duration;

use pana_agents::{ChatService, ChatServiceBuilder};
use pana_context::{ContextIndexer, IndexCache};
use pana_llm::ChatClient;
use pana_persist::PersistenceClient;
use pana_study::{AssessmentGenerator, ExplanationService, SummaryCache, SummaryService};
use pana_types::LLMConfig;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// Services are built once at startup and shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub persist: Arc<dyn PersistenceClient>,
    pub index_cache: Arc<IndexCache>,
    pub chat: Arc<ChatService>,
    pub assessments: Arc<AssessmentGenerator>,
    pub summaries: Arc<SummaryService>,
    pub explanations: Arc<ExplanationService>,
}

impl AppState {
    pub fn new(
        config: Config,
        llm_client: Arc<dyn ChatClient>,
        persist: Arc<dyn PersistenceClient>,
    ) -> anyhow::Result<Self> {
        let llm: LLMConfig = config.llm.clone().into();
        let content = &config.content;

        let index_cache = Arc::new(IndexCache::new(Duration::from_secs(content.index_ttl_secs)));
        let indexer = Arc::new(ContextIndexer::new(
            content.project_root.clone(),
            index_cache.clone(),
        ));

        let chat = ChatServiceBuilder::new()
            .llm_client(llm_client.clone())
            .context_provider(indexer)
            .config(llm.clone())
            .build()?;

        let summaries = SummaryService::new(
            llm_client.clone(),
            llm.clone(),
            content.project_root.clone(),
            SummaryCache::new(content.summary_path()),
        );

        Ok(Self {
            assessments: Arc::new(AssessmentGenerator::new(llm_client.clone(), llm.clone())),
            explanations: Arc::new(ExplanationService::new(llm_client, llm, persist.clone())),
            summaries: Arc::new(summaries),
            chat: Arc::new(chat),
            index_cache,
            persist,
            config: Arc::new(config),
        })
    }
}
