use pana_llm::ScriptedClient;
use pana_study::{AssessmentGenerator, StudyError, DEFAULT_EXAM_TYPE, DEFAULT_TOPIC};
use pana_types::{AssessmentRequest, LLMConfig};
use std::sync::Arc;

fn question_json(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"question": "Q{i}?", "options": ["a", "b", "c", "d"], "answerIndex": {}, "explanation": "because"}}"#,
                i % 4
            )
        })
        .collect();
    format!(r#"{{"questions": [{}]}}"#, items.join(","))
}

fn generator(client: Arc<ScriptedClient>) -> AssessmentGenerator {
    AssessmentGenerator::new(client, LLMConfig::default())
}

#[tokio::test]
async fn test_page_grounded_assessment() {
    let client = Arc::new(ScriptedClient::new().reply(format!("```json\n{}\n```", question_json(5))));
    let page = "Spec-driven development pairs a written specification with agents. ".repeat(4);

    let assessment = generator(client.clone())
        .generate_assessment(AssessmentRequest::new(5).with_topic("X").with_page_content(page.clone()))
        .await
        .unwrap();

    assert_eq!(assessment.questions.len(), 5);
    assert!(assessment.meta.based_on_page_content);
    assert_eq!(assessment.meta.topic, "X");
    assert_eq!(assessment.meta.exam_type, DEFAULT_EXAM_TYPE);
    assert!(assessment
        .questions
        .iter()
        .all(|q| q.options.len() == 4 && q.answer_index < 4));

    let prompt = &client.prompts()[0];
    assert!(prompt.contains("SOURCE CONTENT"));
    assert!(prompt.contains("Spec-driven development"));
    assert!(prompt.contains("exactly 5"));
}

#[tokio::test]
async fn test_short_page_is_not_embedded() {
    let client = Arc::new(ScriptedClient::new().reply(question_json(1)));

    let assessment = generator(client.clone())
        .generate_assessment(AssessmentRequest::new(1).with_page_content("tiny"))
        .await
        .unwrap();

    assert!(assessment.meta.based_on_page_content);
    assert_eq!(assessment.meta.topic, DEFAULT_TOPIC);
    assert!(!client.prompts()[0].contains("SOURCE CONTENT"));
}

#[tokio::test]
async fn test_count_is_exact() {
    let client = Arc::new(
        ScriptedClient::new()
            .reply(question_json(7))
            .reply(question_json(2)),
    );
    let gen = generator(client);

    let trimmed = gen.generate_assessment(AssessmentRequest::new(3)).await.unwrap();
    assert_eq!(trimmed.questions.len(), 3);
    assert!(!trimmed.meta.based_on_page_content);

    let padded = gen.generate_assessment(AssessmentRequest::new(4)).await.unwrap();
    assert_eq!(padded.questions.len(), 4);
    assert_eq!(padded.questions[3].id, "q-3");
    assert_eq!(padded.questions[3].question, "Question 4");
}

#[tokio::test]
async fn test_zero_count_asks_for_one() {
    let client = Arc::new(ScriptedClient::new().reply(question_json(3)));
    let assessment = generator(client)
        .generate_assessment(AssessmentRequest::new(0))
        .await
        .unwrap();
    assert_eq!(assessment.questions.len(), 1);
    assert_eq!(assessment.meta.question_count, 1);
}

#[tokio::test]
async fn test_empty_and_broken_replies() {
    let client = Arc::new(
        ScriptedClient::new()
            .reply(r#"{"questions": []}"#)
            .reply("I cannot help with that")
            .fail("quota exceeded"),
    );
    let gen = generator(client);

    let empty = gen.generate_assessment(AssessmentRequest::new(2)).await;
    assert!(matches!(empty, Err(StudyError::EmptyResult(_))));

    let prose = gen.generate_assessment(AssessmentRequest::new(2)).await;
    assert!(matches!(prose, Err(StudyError::Parse(_))));

    let upstream = gen.generate_assessment(AssessmentRequest::new(2)).await;
    assert!(matches!(upstream, Err(StudyError::Llm(_))));
}

#[tokio::test]
async fn test_topics_are_capped() {
    let topics: Vec<String> = (0..12).map(|i| format!("\" Topic {i} \"")).collect();
    let client = Arc::new(ScriptedClient::new().reply(format!(r#"{{"topics": [{}]}}"#, topics.join(","))));
    let content = "Agents, tools and evaluation loops for building software with models.";

    let list = generator(client).extract_topics(content).await.unwrap();
    assert_eq!(list.topics.len(), 10);
    assert_eq!(list.topics[0], "Topic 0");
    assert_eq!(list.meta.total_topics, 12);
    assert_eq!(list.meta.content_length, content.len());
}

#[tokio::test]
async fn test_topics_need_enough_content() {
    let client = Arc::new(ScriptedClient::new());
    let result = generator(client.clone()).extract_topics("too short").await;
    assert!(matches!(result, Err(StudyError::Validation(_))));
    assert_eq!(client.call_count(), 0);
}
