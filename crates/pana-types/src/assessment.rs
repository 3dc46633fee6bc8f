use serde::{Deserialize, Serialize};

pub const OPTIONS_PER_QUESTION: usize = 4;

/// A four-option multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`, always below [`OPTIONS_PER_QUESTION`]
    pub answer_index: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub question_count: usize,
    pub difficulty: String,
    pub topic: Option<String>,
    pub exam_type: Option<String>,
    pub page_content: Option<String>,
}

impl AssessmentRequest {
    pub fn new(question_count: usize) -> Self {
        Self {
            question_count,
            difficulty: "medium".to_string(),
            topic: None,
            exam_type: None,
            page_content: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_exam_type(mut self, exam_type: impl Into<String>) -> Self {
        self.exam_type = Some(exam_type.into());
        self
    }

    pub fn with_page_content(mut self, content: impl Into<String>) -> Self {
        self.page_content = Some(content.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMeta {
    pub question_count: usize,
    pub difficulty: String,
    pub topic: String,
    pub exam_type: String,
    pub based_on_page_content: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub questions: Vec<AssessmentQuestion>,
    pub meta: AssessmentMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMeta {
    pub total_topics: usize,
    pub content_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicList {
    pub topics: Vec<String>,
    pub meta: TopicMeta,
}
