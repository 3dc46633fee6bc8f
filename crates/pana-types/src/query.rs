use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    Question,
    Command,
    Clarification,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    #[default]
    Explanation,
    Code,
    Example,
    Reference,
    Search,
}

/// Fixed-schema view of a user message, produced per chat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub intent: Intent,
    pub topics: Vec<String>,
    pub keywords: Vec<String>,
    pub requires_context: bool,
    pub complexity: Complexity,
    pub expected_response_type: ResponseType,
}

impl Default for StructuredQuery {
    fn default() -> Self {
        Self {
            intent: Intent::default(),
            topics: Vec::new(),
            keywords: Vec::new(),
            requires_context: true,
            complexity: Complexity::default(),
            expected_response_type: ResponseType::default(),
        }
    }
}

impl StructuredQuery {
    /// Defaults with keywords taken from the query's words longer than 3 chars
    pub fn fallback_for(query: &str) -> Self {
        Self {
            keywords: query
                .split_whitespace()
                .filter(|w| w.chars().count() > 3)
                .map(str::to_string)
                .collect(),
            ..Self::default()
        }
    }
}
