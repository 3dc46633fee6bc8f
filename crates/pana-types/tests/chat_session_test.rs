use pana_types::chat::{DEFAULT_SESSION_TITLE, GREETING};
use pana_types::{ChatMessage, ChatReply, ChatSession, ReplyMetadata, Source, SourceKind};

#[test]
fn test_new_session_starts_with_greeting() {
    let session = ChatSession::new();
    assert_eq!(session.title, DEFAULT_SESSION_TITLE);
    assert_eq!(session.messages.len(), 1);
    assert!(session.messages[0].is_bot);
    assert_eq!(session.messages[0].text, GREETING);
}

#[test]
fn test_title_derived_from_first_user_message() {
    let mut session = ChatSession::new();
    session.push(ChatMessage::user("What is a ROS 2 node?"));
    session.push(ChatMessage::user("And a topic?"));
    assert_eq!(session.title, "What is a ROS 2 node?");
}

#[test]
fn test_long_title_is_truncated() {
    let mut session = ChatSession::new();
    let text = "x".repeat(80);
    session.push(ChatMessage::user(text));
    assert_eq!(session.title, format!("{}...", "x".repeat(50)));
}

#[test]
fn test_bot_message_does_not_set_title() {
    let mut session = ChatSession::new();
    session.push(ChatMessage::bot("hello again"));
    assert_eq!(session.title, DEFAULT_SESSION_TITLE);
}

#[test]
fn test_rename_overrides_and_sticks() {
    let mut session = ChatSession::new();
    let before = session.updated_at;
    session.rename("Kinematics");
    session.push(ChatMessage::user("first question"));
    assert_eq!(session.title, "Kinematics");
    assert!(session.updated_at >= before);
}

#[test]
fn test_history_returns_last_turns() {
    let mut session = ChatSession::new();
    for i in 0..12 {
        session.push(ChatMessage::user(format!("q{i}")));
    }
    let history = session.history(10);
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].text, "q2");
    assert_eq!(history[9].text, "q11");
    assert!(!history[9].is_bot);
}

#[test]
fn test_reply_wire_shape() {
    let reply = ChatReply {
        message: "Hi!".into(),
        is_in_tone: true,
        confidence: 1.0,
        sources: vec![],
        metadata: ReplyMetadata {
            structured_query: None,
            used_browser_search: None,
            handled_by: Some("chatService.smallTalk".into()),
        },
    };
    let json = serde_json::to_value(&reply).unwrap();
    assert_eq!(json["isInTone"], true);
    assert!(json["metadata"]["structuredQuery"].is_null());
    assert_eq!(json["metadata"]["handledBy"], "chatService.smallTalk");
    assert!(json["metadata"].get("usedBrowserSearch").is_none());

    let message = ChatMessage::from_reply(&reply);
    assert!(message.is_bot);
    assert_eq!(message.metadata.unwrap().confidence, 1.0);
}

#[test]
fn test_source_serialization() {
    let file = serde_json::to_value(Source::file("docs/intro.md", "Intro")).unwrap();
    assert_eq!(file["type"], "file");
    assert_eq!(file["path"], "docs/intro.md");

    let web = serde_json::to_value(Source::web()).unwrap();
    assert_eq!(web, serde_json::json!({"type": "web"}));
    assert_eq!(Source::web().kind, SourceKind::Web);
}
