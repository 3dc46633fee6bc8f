use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::MongoExplanation;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoExplanationRepository {
    collection: Collection<MongoExplanation>,
}

impl MongoExplanationRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("explanations");
        Self { collection }
    }

    pub async fn find(
        &self,
        user_id: &str,
        page_path: &str,
        page_title: &str,
    ) -> Result<Option<MongoExplanation>> {
        let filter = doc! {
            "userId": user_id,
            "pagePath": page_path,
            "pageTitle": page_title
        };
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn insert(&self, explanation: MongoExplanation) -> Result<()> {
        self.collection.insert_one(&explanation).await?;
        Ok(())
    }
}
