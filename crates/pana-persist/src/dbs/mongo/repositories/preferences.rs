use bson::DateTime as BsonDateTime;
use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::MongoPreferences;
use crate::error::Result;
use crate::models::UpsertOutcome;

#[derive(Clone)]
pub struct MongoPreferencesRepository {
    collection: Collection<MongoPreferences>,
}

impl MongoPreferencesRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("user_preferences");
        Self { collection }
    }

    pub async fn find(&self, user_id: &str) -> Result<Option<MongoPreferences>> {
        let filter = doc! { "userId": user_id };
        Ok(self.collection.find_one(filter).await?)
    }

    /// `$set` the levels, `$setOnInsert` the identity and creation time
    pub async fn upsert(
        &self,
        user_id: &str,
        ai_experience: &str,
        coding_experience: &str,
    ) -> Result<UpsertOutcome> {
        let now = BsonDateTime::now();
        let filter = doc! { "userId": user_id };
        let update = doc! {
            "$set": {
                "aiExperience": ai_experience,
                "codingExperience": coding_experience,
                "updatedAt": now
            },
            "$setOnInsert": {
                "userId": user_id,
                "createdAt": now
            }
        };

        let result = self.collection.update_one(filter, update).upsert(true).await?;
        Ok(if result.upserted_id.is_some() {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }
}
