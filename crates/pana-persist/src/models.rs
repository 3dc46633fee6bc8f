use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cookie set by the external auth library; value is `token.signature`
pub const SESSION_COOKIE: &str = "better-auth.session_token";

/// Row of the auth library's `session` collection, read-only here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Fields a user may change on their own account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Token part of a session cookie value (`token.signature`)
pub fn session_token(cookie_value: &str) -> Option<&str> {
    let token = cookie_value.split('.').next()?.trim();
    (!token.is_empty()).then_some(token)
}
