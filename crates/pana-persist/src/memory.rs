//! Process-local [`PersistenceClient`] for tests and database-less runs.

use async_trait::async_trait;
use chrono::Utc;
use pana_types::{Explanation, UserPreferences, UserSummary};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::models::{ProfileUpdate, SessionRecord, UpsertOutcome};
use crate::trait_client::PersistenceClient;

#[derive(Default)]
struct Store {
    preferences: HashMap<String, UserPreferences>,
    explanations: Vec<Explanation>,
    users: Vec<UserSummary>,
    sessions: HashMap<String, SessionRecord>,
}

#[derive(Default)]
pub struct InMemoryPersistence {
    store: RwLock<Store>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account as the auth library would have created it
    pub fn with_user(self, user: UserSummary) -> Self {
        if let Ok(mut store) = self.store.write() {
            store.users.push(user);
        }
        self
    }

    pub fn with_session(self, session: SessionRecord) -> Self {
        if let Ok(mut store) = self.store.write() {
            store.sessions.insert(session.token.clone(), session);
        }
        self
    }

    pub fn explanation_count(&self) -> usize {
        self.store.read().map(|s| s.explanations.len()).unwrap_or(0)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| PersistError::Internal("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| PersistError::Internal("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PersistenceClient for InMemoryPersistence {
    async fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        Ok(self.read()?.preferences.get(user_id).cloned())
    }

    async fn upsert_preferences(
        &self,
        user_id: &str,
        ai_experience: &str,
        coding_experience: &str,
    ) -> Result<UpsertOutcome> {
        let mut store = self.write()?;
        if let Some(existing) = store.preferences.get_mut(user_id) {
            existing.ai_experience = ai_experience.to_string();
            existing.coding_experience = coding_experience.to_string();
            existing.updated_at = Utc::now();
            return Ok(UpsertOutcome::Updated);
        }

        store.preferences.insert(
            user_id.to_string(),
            UserPreferences::new(user_id, ai_experience, coding_experience),
        );
        Ok(UpsertOutcome::Created)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<()> {
        let mut store = self.write()?;
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| PersistError::UserNotFound(user_id.to_string()))?;

        if let Some(name) = update.name {
            user.name = Some(name);
        }
        if let Some(image) = update.image {
            user.image = Some(image);
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        Ok(self.read()?.users.clone())
    }

    async fn find_explanation(
        &self,
        user_id: &str,
        page_path: &str,
        page_title: &str,
    ) -> Result<Option<Explanation>> {
        Ok(self
            .read()?
            .explanations
            .iter()
            .find(|e| e.user_id == user_id && e.page_path == page_path && e.page_title == page_title)
            .cloned())
    }

    async fn save_explanation(&self, explanation: Explanation) -> Result<()> {
        self.write()?.explanations.push(explanation);
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<SessionRecord>> {
        Ok(self.read()?.sessions.get(token).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
