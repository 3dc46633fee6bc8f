use crate::templates::{BROWSER_SEARCH_FALLBACK, BROWSER_SEARCH_PROMPT, PROJECT_DOMAIN};
use pana_llm::ChatClient;
use pana_types::LLMConfig;
use std::sync::Arc;
use tracing::warn;

/// Simulated web search: the model bridges an off-topic query back to the book
///
/// Never fails; a fixed paragraph stands in when the model is unavailable.
pub struct BrowserSearch {
    client: Arc<dyn ChatClient>,
    llm: LLMConfig,
}

impl BrowserSearch {
    pub fn new(client: Arc<dyn ChatClient>, llm: LLMConfig) -> Self {
        Self { client, llm }
    }

    pub async fn search(&self, query: &str) -> String {
        let prompt = BROWSER_SEARCH_PROMPT
            .replace("<domain>", PROJECT_DOMAIN)
            .replace("<query>", query);

        match self.client.generate(&self.llm.model, &prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => BROWSER_SEARCH_FALLBACK.replace("<query>", query),
            Err(err) => {
                warn!(error = %err, "browser search failed");
                BROWSER_SEARCH_FALLBACK.replace("<query>", query)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pana_llm::ScriptedClient;

    #[tokio::test]
    async fn returns_model_text() {
        let search = BrowserSearch::new(
            Arc::new(ScriptedClient::new().reply("Sourdough needs time.")),
            LLMConfig::default(),
        );
        assert_eq!(search.search("bread").await, "Sourdough needs time.");
    }

    #[tokio::test]
    async fn failure_mentions_query() {
        let search = BrowserSearch::new(
            Arc::new(ScriptedClient::new().fail("503")),
            LLMConfig::default(),
        );
        let text = search.search("sourdough").await;
        assert!(text.contains("\"sourdough\""));
    }
}
