use pana_llm::ScriptedClient;
use pana_study::{StudyError, SummaryCache, SummaryService};
use pana_types::{LLMConfig, SummarySize};
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    client: Arc<ScriptedClient>,
    service: SummaryService,
}

fn fixture(client: ScriptedClient) -> Fixture {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("docs/chapter-1")).unwrap();
    std::fs::write(
        root.path().join("docs/chapter-1/intro.md"),
        "# Intro\n\nAgents plan, act and observe.",
    )
    .unwrap();

    let client = Arc::new(client);
    let service = SummaryService::new(
        client.clone(),
        LLMConfig::default(),
        root.path(),
        SummaryCache::new(root.path().join("summary")),
    );
    Fixture {
        _root: root,
        client,
        service,
    }
}

#[tokio::test]
async fn test_generate_then_hit_cache() {
    let f = fixture(ScriptedClient::new().reply("```markdown\n## Intro\n\n\n\nAgents loop.\n```"));

    let first = f
        .service
        .generate_summary("docs/chapter-1/intro.md", "Intro", SummarySize::Short)
        .await
        .unwrap();
    assert_eq!(first, "## Intro\n\nAgents loop.");
    assert!(f.client.prompts()[0].contains("Agents plan, act and observe."));
    assert!(f.client.prompts()[0].contains("\"Intro\""));

    let hit = f
        .service
        .get_summary("docs/chapter-1/intro.md", SummarySize::Short)
        .await
        .unwrap();
    let again = f
        .service
        .get_summary("docs/chapter-1/intro.md", SummarySize::Short)
        .await
        .unwrap();
    assert_eq!(hit.as_deref(), Some(first.as_str()));
    assert_eq!(hit, again);

    let regenerated = f
        .service
        .generate_summary("docs/chapter-1/intro.md", "Intro", SummarySize::Short)
        .await
        .unwrap();
    assert_eq!(regenerated, first);
    assert_eq!(f.client.call_count(), 1);

    assert!(f
        .service
        .cache()
        .dir()
        .join("chapter-1__intro__short.json")
        .exists());
}

#[tokio::test]
async fn test_sizes_are_cached_separately() {
    let f = fixture(ScriptedClient::new().reply("short one").reply("long one"));

    f.service
        .generate_summary("docs/chapter-1/intro.md", "Intro", SummarySize::Short)
        .await
        .unwrap();
    assert!(f
        .service
        .get_summary("docs/chapter-1/intro.md", SummarySize::Long)
        .await
        .unwrap()
        .is_none());

    let long = f
        .service
        .generate_summary("docs/chapter-1/intro.md", "Intro", SummarySize::Long)
        .await
        .unwrap();
    assert_eq!(long, "long one");
    assert!(f.client.prompts()[1].contains("1000"));
}

#[tokio::test]
async fn test_missing_source_page() {
    let f = fixture(ScriptedClient::new());
    let result = f
        .service
        .generate_summary("docs/missing.md", "Missing", SummarySize::Short)
        .await;
    assert!(matches!(result, Err(StudyError::SourceUnavailable { .. })));
    assert_eq!(f.client.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_page_path() {
    let f = fixture(ScriptedClient::new());
    let result = f.service.get_summary("docs/../secrets.md", SummarySize::Short).await;
    assert!(matches!(result, Err(StudyError::Validation(_))));
}
