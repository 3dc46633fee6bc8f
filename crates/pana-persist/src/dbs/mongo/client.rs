use async_trait::async_trait;
use mongodb::{bson::doc, Client, Database};
use tracing::info;

use pana_types::{Explanation, UserPreferences, UserSummary};

use crate::dbs::mongo::repositories::{
    MongoExplanationRepository, MongoPreferencesRepository, MongoSessionRepository,
    MongoUserRepository,
};
use crate::error::{PersistError, Result};
use crate::models::{ProfileUpdate, SessionRecord, UpsertOutcome};
use crate::trait_client::PersistenceClient;

pub struct MongoPersistenceClient {
    database: Database,
    preferences_repo: MongoPreferencesRepository,
    explanation_repo: MongoExplanationRepository,
    user_repo: MongoUserRepository,
    session_repo: MongoSessionRepository,
}

impl MongoPersistenceClient {
    /// Connect to MongoDB and create client
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        info!(database, "connected to MongoDB");

        Ok(Self {
            database: client.database(database),
            preferences_repo: MongoPreferencesRepository::new(&client, database),
            explanation_repo: MongoExplanationRepository::new(&client, database),
            user_repo: MongoUserRepository::new(&client, database),
            session_repo: MongoSessionRepository::new(&client, database),
        })
    }
}

#[async_trait]
impl PersistenceClient for MongoPersistenceClient {
    async fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        let doc = self.preferences_repo.find(user_id).await?;
        Ok(doc.map(Into::into))
    }

    async fn upsert_preferences(
        &self,
        user_id: &str,
        ai_experience: &str,
        coding_experience: &str,
    ) -> Result<UpsertOutcome> {
        self.preferences_repo
            .upsert(user_id, ai_experience, coding_experience)
            .await
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<()> {
        self.user_repo.update_profile(user_id, update).await
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn find_explanation(
        &self,
        user_id: &str,
        page_path: &str,
        page_title: &str,
    ) -> Result<Option<Explanation>> {
        let doc = self
            .explanation_repo
            .find(user_id, page_path, page_title)
            .await?;
        Ok(doc.map(Into::into))
    }

    async fn save_explanation(&self, explanation: Explanation) -> Result<()> {
        self.explanation_repo.insert(explanation.into()).await
    }

    async fn find_session(&self, token: &str) -> Result<Option<SessionRecord>> {
        let doc = self.session_repo.find_by_token(token).await?;
        Ok(doc.map(Into::into))
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
