use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{Duration, Utc};
use pana_api::{build_router, config::Config, state::AppState};
use pana_llm::ScriptedClient;
use pana_persist::{InMemoryPersistence, SessionRecord};
use pana_types::UserSummary;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const SESSION: &str = "better-auth.session_token=tok-1.signature";

struct TestApp {
    router: Router,
    client: Arc<ScriptedClient>,
    _root: TempDir,
}

fn test_config(root: &TempDir) -> Config {
    let raw = format!(
        r#"
        [server]
        host = "127.0.0.1"
        port = 0

        [cors]
        enabled = true
        origins = ["http://localhost:3000"]

        [mongodb]
        database = "test"

        [llm]
        model = "gemini-2.0-flash"

        [content]
        project_root = "{}"
        summary_dir = "summary"

        [logging]
        level = "debug"
        format = "pretty"
        "#,
        root.path().display()
    );
    toml::from_str::<Config>(&raw)
        .unwrap()
        .with_admin("admin", "letmein")
}

fn spawn(client: ScriptedClient) -> TestApp {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("docs")).unwrap();
    std::fs::write(
        root.path().join("docs/intro.md"),
        "---\ntitle: Intro\n---\n# Intro\n\nAgents use tools to act.",
    )
    .unwrap();

    let persist = InMemoryPersistence::new()
        .with_user(UserSummary {
            id: "user-1".into(),
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            image: None,
            ai_experience: None,
            coding_experience: None,
            created_at: Some(Utc::now()),
        })
        .with_session(SessionRecord {
            token: "tok-1".into(),
            user_id: "user-1".into(),
            expires_at: Utc::now() + Duration::hours(1),
        })
        .with_session(SessionRecord {
            token: "tok-ghost".into(),
            user_id: "ghost".into(),
            expires_at: Utc::now() + Duration::hours(1),
        });

    let client = Arc::new(client);
    let state = AppState::new(test_config(&root), client.clone(), Arc::new(persist)).unwrap();

    TestApp {
        router: build_router(Arc::new(state)),
        client,
        _root: root,
    }
}

fn questions(n: usize) -> String {
    let items: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "question": format!("What does step {i} do?"),
                "options": ["Plans", "Acts", "Observes", "Reflects"],
                "answerIndex": i % 4,
                "explanation": "Covered in the lesson."
            })
        })
        .collect();
    json!({ "questions": items }).to_string()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_cookie(mut req: Request<Body>, cookie: &str) -> Request<Body> {
    req.headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    req
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response: Response = app.router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let app = spawn(ScriptedClient::new());
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["mongodb"], "connected");
}

#[tokio::test]
async fn test_chat_requires_string_message() {
    let app = spawn(ScriptedClient::new());

    let (status, body) = send(&app, post("/api/chat/message", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required and must be a string");

    let (status, _) = send(&app, post("/api/chat/message", json!({"message": 42}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_small_talk_skips_model() {
    let app = spawn(ScriptedClient::new());
    let (status, body) = send(
        &app,
        post("/api/chat/message", json!({"message": "hello", "conversationHistory": []})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isInTone"], true);
    assert_eq!(body["confidence"], 1.0);
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(app.client.call_count(), 0);
}

#[tokio::test]
async fn test_chat_upstream_failure_is_500() {
    let app = spawn(ScriptedClient::new().respond_with(|_| Err(anyhow::anyhow!("quota"))));
    let (status, body) = send(
        &app,
        post(
            "/api/chat/message",
            json!({"message": "How do agents use tools with spec-driven development?"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process message");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_assessment_from_page_content() {
    let app = spawn(ScriptedClient::new().reply(questions(5)));
    let page_content = "Agentic workflows combine planning, tool use and reflection. ".repeat(4);
    assert!(page_content.len() >= 200);

    let (status, body) = send(
        &app,
        post(
            "/api/assessment/generate",
            json!({
                "questionCount": 5,
                "difficulty": "medium",
                "topic": "X",
                "pageContent": page_content
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 5);
    assert_eq!(body["meta"]["basedOnPageContent"], true);
    assert_eq!(body["meta"]["topic"], "X");
    for question in body["questions"].as_array().unwrap() {
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
        assert!(question["answerIndex"].as_u64().unwrap() < 4);
    }
}

#[tokio::test]
async fn test_assessment_count_validation() {
    let app = spawn(ScriptedClient::new().reply(questions(3)));

    let (status, body) = send(
        &app,
        post("/api/assessment/generate", json!({"questionCount": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "questionCount must be a positive number");

    let (status, body) = send(
        &app,
        post(
            "/api/assessment/generate",
            json!({"questionCount": "3", "difficulty": "HARD"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["difficulty"], "hard");
    assert_eq!(body["meta"]["basedOnPageContent"], false);
}

#[tokio::test]
async fn test_assessment_count_upper_bound() {
    let app = spawn(ScriptedClient::new());

    for count in [json!(1e20), json!("1000000000"), json!(51)] {
        let (status, body) = send(
            &app,
            post("/api/assessment/generate", json!({ "questionCount": count })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "questionCount must be at most 50");
    }
    assert_eq!(app.client.call_count(), 0);
}

#[tokio::test]
async fn test_extract_topics_validation() {
    let app = spawn(ScriptedClient::new());

    let (status, _) = send(&app, post("/api/assessment/extract-topics", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        post("/api/assessment/extract-topics", json!({"content": "short"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("too short"));
    assert_eq!(app.client.call_count(), 0);
}

#[tokio::test]
async fn test_summary_lifecycle() {
    let app = spawn(ScriptedClient::new().reply("```markdown\n## Intro\n\nAgents act.\n```"));

    let (status, body) = send(&app, get("/api/summary/check?pagePath=docs/intro.md&size=short")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
    assert!(body["summary"].is_null());

    let (status, body) = send(
        &app,
        post(
            "/api/summary/generate",
            json!({"pagePath": "docs/intro.md", "pageTitle": "Intro", "size": "short"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "## Intro\n\nAgents act.");

    let (status, body) = send(&app, get("/api/summary/check?pagePath=docs/intro.md")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);
    assert_eq!(body["summary"], "## Intro\n\nAgents act.");
    assert_eq!(app.client.call_count(), 1);
}

#[tokio::test]
async fn test_summary_errors() {
    let app = spawn(ScriptedClient::new());

    let (status, _) = send(&app, get("/api/summary/check?pagePath=docs/../x.md")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/summary/check?pagePath=docs/intro.md&size=huge")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post(
            "/api/summary/generate",
            json!({"pagePath": "docs/missing.md", "pageTitle": "Missing"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preferences_flow() {
    let app = spawn(ScriptedClient::new());

    let (_, body) = send(&app, get("/api/user/check-personalization")).await;
    assert_eq!(body["completed"], false);

    let prefs = json!({"aiExperience": "Intermediate", "codingExperience": "Expert"});
    let (status, _) = send(&app, post("/api/user/preferences", prefs.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, with_cookie(post("/api/user/preferences", prefs), SESSION)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, with_cookie(get("/api/user/check-personalization"), SESSION)).await;
    assert_eq!(body["completed"], true);
}

#[tokio::test]
async fn test_update_profile() {
    let app = spawn(ScriptedClient::new());
    let update = json!({"name": "Ada L."});

    let (status, _) = send(&app, post("/api/user/update-profile", update.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        with_cookie(post("/api/user/update-profile", update.clone()), SESSION),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        with_cookie(
            post("/api/user/update-profile", update),
            "better-auth.session_token=tok-ghost.sig",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_explanation_requires_session_and_caches() {
    let app = spawn(ScriptedClient::new().reply("html\n<h3>Tools</h3>"));
    let body = json!({"pageTitle": "Tools", "pagePath": "docs/tools.md"});

    let (status, _) = send(&app, post("/api/explanation/generate", body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, first) = send(
        &app,
        with_cookie(post("/api/explanation/generate", body.clone()), SESSION),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["explanation"], "<h3>Tools</h3>");
    assert_eq!(first["cached"], false);

    let (_, second) = send(&app, with_cookie(post("/api/explanation/generate", body), SESSION)).await;
    assert_eq!(second["cached"], true);
    assert_eq!(app.client.call_count(), 1);
}

#[tokio::test]
async fn test_expired_session_is_unauthorized() {
    let app = spawn(ScriptedClient::new());
    let (status, _) = send(
        &app,
        with_cookie(
            post("/api/explanation/generate", json!({"pageTitle": "T", "pagePath": "docs/t.md"})),
            "better-auth.session_token=unknown.sig",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_users_basic_auth() {
    let app = spawn(ScriptedClient::new());

    let (status, body) = send(&app, get("/api/admin/users")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing Authorization Header");

    let mut wrong = get("/api/admin/users");
    wrong.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Basic {}", STANDARD.encode("admin:nope")).parse().unwrap(),
    );
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut right = get("/api/admin/users");
    right.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Basic {}", STANDARD.encode("admin:letmein")).parse().unwrap(),
    );
    let (status, body) = send(&app, right).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "ada@example.com");
}
