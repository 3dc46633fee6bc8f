use async_trait::async_trait;
use pana_types::{Explanation, UserPreferences, UserSummary};
use tracing::warn;

use crate::error::Result;
use crate::models::{session_token, ProfileUpdate, SessionRecord, UpsertOutcome};

/// Trait for database persistence operations
///
/// Implementations provide database-specific reads and writes; the provided
/// methods build the request-level operations on top of them.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Preferences row for a user, if one was ever saved
    async fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>>;

    /// Set both experience levels, creating the row on first submission
    async fn upsert_preferences(
        &self,
        user_id: &str,
        ai_experience: &str,
        coding_experience: &str,
    ) -> Result<UpsertOutcome>;

    /// Update the auth library's user record; unknown users are an error
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<()>;

    /// Every account, sanitized for the admin listing
    async fn list_users(&self) -> Result<Vec<UserSummary>>;

    async fn find_explanation(
        &self,
        user_id: &str,
        page_path: &str,
        page_title: &str,
    ) -> Result<Option<Explanation>>;

    async fn save_explanation(&self, explanation: Explanation) -> Result<()>;

    /// Session row by token, expired or not
    async fn find_session(&self, token: &str) -> Result<Option<SessionRecord>>;

    /// Cheap round trip used by health checks
    async fn ping(&self) -> Result<()>;

    /// Whether both experience levels are filled in; lookup errors count as no
    async fn check_personalization(&self, user_id: &str) -> bool {
        match self.get_preferences(user_id).await {
            Ok(prefs) => prefs.map(|p| p.is_complete()).unwrap_or(false),
            Err(err) => {
                warn!(user_id, error = %err, "personalization lookup failed");
                false
            }
        }
    }

    /// User id behind a session cookie value, if the session is live
    async fn resolve_session(&self, cookie_value: &str) -> Result<Option<String>> {
        let Some(token) = session_token(cookie_value) else {
            return Ok(None);
        };
        Ok(self
            .find_session(token)
            .await?
            .filter(|session| !session.is_expired())
            .map(|session| session.user_id))
    }
}
