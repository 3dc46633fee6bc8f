use bson::{oid::ObjectId, DateTime as BsonDateTime, Document};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::MongoUser;
use crate::error::{PersistError, Result};
use crate::models::ProfileUpdate;

/// Accounts owned by the external auth library
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<MongoUser>,
}

impl MongoUserRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("user");
        Self { collection }
    }

    pub async fn list(&self) -> Result<Vec<MongoUser>> {
        let users = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(users)
    }

    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<()> {
        let filter = match ObjectId::parse_str(user_id) {
            Ok(oid) => doc! { "_id": oid },
            Err(_) => doc! { "_id": user_id },
        };

        let mut fields = Document::new();
        if let Some(name) = update.name {
            fields.insert("name", name);
        }
        if let Some(image) = update.image {
            fields.insert("image", image);
        }
        fields.insert("updatedAt", BsonDateTime::now());

        let result = self
            .collection
            .update_one(filter, doc! { "$set": fields })
            .await?;
        if result.matched_count == 0 {
            return Err(PersistError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }
}
