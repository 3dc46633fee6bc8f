use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Level assumed when a user never filled in the questionnaire
pub const DEFAULT_EXPERIENCE: &str = "Beginner";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub user_id: String,
    pub ai_experience: String,
    pub coding_experience: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    pub fn new(
        user_id: impl Into<String>,
        ai_experience: impl Into<String>,
        coding_experience: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            ai_experience: ai_experience.into(),
            coding_experience: coding_experience.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Both experience levels are filled in
    pub fn is_complete(&self) -> bool {
        !self.ai_experience.trim().is_empty() && !self.coding_experience.trim().is_empty()
    }
}

/// Cached personalized page explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub user_id: String,
    pub page_path: String,
    pub page_title: String,
    pub content: String,
    pub ai_level: String,
    pub coding_level: String,
    pub created_at: DateTime<Utc>,
}

/// Account fields safe to expose on the admin listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub ai_experience: Option<String>,
    pub coding_experience: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
