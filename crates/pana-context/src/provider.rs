use async_trait::async_trait;
use pana_types::ProjectContext;

/// Source of project material for a query
///
/// Lookups never fail: implementations degrade to a fallback context.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn get_relevant_context(&self, query: &str) -> ProjectContext;
}
