use anyhow::Result;
use async_trait::async_trait;
use pana_agents::{
    Answer, AnswerAgent, AnswerRequest, ChatServiceBuilder, SmallTalkCategory, SMALL_TALK_HANDLER,
};
use pana_context::ContextProvider;
use pana_llm::ScriptedClient;
use pana_types::{ContextFile, ConversationTurn, Intent, ProjectContext};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct FixedContext {
    calls: AtomicUsize,
}

#[async_trait]
impl ContextProvider for FixedContext {
    async fn get_relevant_context(&self, _query: &str) -> ProjectContext {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ProjectContext {
            summary: "File: docs/mcp.md\nContent preview: MCP servers...".into(),
            content: String::new(),
            files: vec![ContextFile {
                path: "docs/mcp.md".into(),
                title: "MCP".into(),
                score: 7,
            }],
            total_files: 12,
        }
    }
}

/// Records what the pipeline hands to the final stage
#[derive(Default)]
struct RecordingAgent {
    seen: Mutex<Vec<(String, bool, bool, usize)>>,
}

#[async_trait]
impl AnswerAgent for RecordingAgent {
    async fn answer(&self, request: AnswerRequest<'_>) -> Result<Answer> {
        self.seen.lock().unwrap().push((
            request.query.to_string(),
            request.is_summary,
            request.tone.is_in_tone,
            request.conversation_history.len(),
        ));
        Ok(Answer {
            text: "recorded".into(),
            sources: vec![],
            used_browser_search: false,
        })
    }
}

fn context() -> Arc<FixedContext> {
    Arc::new(FixedContext {
        calls: AtomicUsize::new(0),
    })
}

#[tokio::test]
async fn test_small_talk_short_circuits() {
    let client = Arc::new(ScriptedClient::new());
    let ctx = context();
    let service = ChatServiceBuilder::new()
        .llm_client(client.clone())
        .context_provider(ctx.clone())
        .build()
        .unwrap();

    let reply = service.process_message("  Hello there!  ", &[]).await.unwrap();

    assert!(reply.is_in_tone);
    assert_eq!(reply.confidence, 1.0);
    assert!(reply.sources.is_empty());
    assert!(SmallTalkCategory::Greeting.replies().contains(&reply.message.as_str()));
    assert_eq!(reply.metadata.handled_by.as_deref(), Some(SMALL_TALK_HANDLER));
    assert!(reply.metadata.structured_query.is_none());
    assert_eq!(client.call_count(), 0);
    assert_eq!(ctx.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_confident_query_skips_full_tone_check() {
    // structuring reply, then the answer
    let client = Arc::new(
        ScriptedClient::new()
            .reply(r#"{"intent": "command", "keywords": ["mcp"]}"#)
            .reply("Use the MCP SDK."),
    );
    let service = ChatServiceBuilder::new()
        .llm_client(client.clone())
        .context_provider(context())
        .build()
        .unwrap();

    let reply = service
        .process_message(
            "build an mcp server for agentic ai systems in python programming",
            &[],
        )
        .await
        .unwrap();

    assert_eq!(reply.message, "Use the MCP SDK.");
    assert!(reply.is_in_tone);
    assert_eq!(client.call_count(), 2);
    let structured = reply.metadata.structured_query.unwrap();
    assert_eq!(structured.intent, Intent::Command);
    assert_eq!(reply.metadata.used_browser_search, Some(false));
    assert_eq!(reply.sources.len(), 1);
}

#[tokio::test]
async fn test_uncertain_query_escalates_then_searches() {
    let client = Arc::new(
        ScriptedClient::new()
            .reply(r#"{"isInTone": false, "confidence": 0.9, "reasoning": "food"}"#)
            .reply("not json")
            .reply("pizza facts")
            .reply("Here is how pizza relates."),
    );
    let service = ChatServiceBuilder::new()
        .llm_client(client.clone())
        .context_provider(context())
        .build()
        .unwrap();

    let reply = service.process_message("best pizza dough", &[]).await.unwrap();

    assert!(!reply.is_in_tone);
    assert_eq!(reply.confidence, 0.9);
    assert_eq!(reply.metadata.used_browser_search, Some(true));
    assert_eq!(client.call_count(), 4);

    let structured = reply.metadata.structured_query.unwrap();
    assert_eq!(structured.keywords, vec!["best", "pizza", "dough"]);
}

#[tokio::test]
async fn test_summary_request_never_escalates() {
    let agent = Arc::new(RecordingAgent::default());
    let client = Arc::new(ScriptedClient::new().reply("{}"));
    let service = ChatServiceBuilder::new()
        .llm_client(client.clone())
        .context_provider(context())
        .answer_agent(agent.clone())
        .build()
        .unwrap();

    let history = vec![ConversationTurn {
        text: "hi".into(),
        is_bot: false,
    }];
    let reply = service
        .process_message("Summarize the following: kitchens and ovens", &history)
        .await
        .unwrap();

    assert_eq!(reply.message, "recorded");
    // only the structuring call reached the model
    assert_eq!(client.call_count(), 1);

    let seen = agent.seen.lock().unwrap();
    assert_eq!(
        seen[0],
        ("Summarize the following: kitchens and ovens".to_string(), true, false, 1)
    );
}

#[tokio::test]
async fn test_answer_failure_propagates() {
    let client = Arc::new(ScriptedClient::new().reply("{}").fail("quota exceeded"));
    let service = ChatServiceBuilder::new()
        .llm_client(client)
        .context_provider(context())
        .build()
        .unwrap();

    let result = service
        .process_message("agentic ai systems with python programming", &[])
        .await;
    assert!(result.is_err());
}

#[test]
fn test_builder_requires_collaborators() {
    assert!(ChatServiceBuilder::new().build().is_err());
    assert!(ChatServiceBuilder::new()
        .llm_client(Arc::new(ScriptedClient::new()))
        .build()
        .is_err());
}
