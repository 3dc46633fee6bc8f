use bson::{oid::ObjectId, Bson, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use pana_types::{Explanation, UserPreferences, UserSummary};

use crate::models::SessionRecord;

/// `user_preferences` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoPreferences {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub ai_experience: Option<String>,
    pub coding_experience: Option<String>,
    pub created_at: Option<BsonDateTime>,
    pub updated_at: Option<BsonDateTime>,
}

/// `explanations` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoExplanation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub page_path: String,
    pub page_title: String,
    pub content: String,
    pub ai_level: String,
    pub coding_level: String,
    pub created_at: BsonDateTime,
}

/// Auth library `user` document; only the fields we expose
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoUser {
    #[serde(rename = "_id")]
    pub id: Bson,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub ai_experience: Option<String>,
    pub coding_experience: Option<String>,
    pub created_at: Option<BsonDateTime>,
}

/// Auth library `session` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoSession {
    pub token: String,
    /// ObjectId or string depending on the auth library version
    pub user_id: Bson,
    pub expires_at: BsonDateTime,
}

/// Hex for ObjectIds, the plain value for strings
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<MongoPreferences> for UserPreferences {
    fn from(doc: MongoPreferences) -> Self {
        let created_at = doc.created_at.map(|d| d.to_chrono()).unwrap_or_default();
        Self {
            user_id: doc.user_id,
            ai_experience: doc.ai_experience.unwrap_or_default(),
            coding_experience: doc.coding_experience.unwrap_or_default(),
            created_at,
            updated_at: doc.updated_at.map(|d| d.to_chrono()).unwrap_or(created_at),
        }
    }
}

impl From<Explanation> for MongoExplanation {
    fn from(e: Explanation) -> Self {
        Self {
            id: None,
            user_id: e.user_id,
            page_path: e.page_path,
            page_title: e.page_title,
            content: e.content,
            ai_level: e.ai_level,
            coding_level: e.coding_level,
            created_at: BsonDateTime::from_chrono(e.created_at),
        }
    }
}

impl From<MongoExplanation> for Explanation {
    fn from(doc: MongoExplanation) -> Self {
        Self {
            user_id: doc.user_id,
            page_path: doc.page_path,
            page_title: doc.page_title,
            content: doc.content,
            ai_level: doc.ai_level,
            coding_level: doc.coding_level,
            created_at: doc.created_at.to_chrono(),
        }
    }
}

impl From<MongoUser> for UserSummary {
    fn from(doc: MongoUser) -> Self {
        Self {
            id: id_to_string(&doc.id),
            name: doc.name,
            email: doc.email,
            image: doc.image,
            ai_experience: doc.ai_experience,
            coding_experience: doc.coding_experience,
            created_at: doc.created_at.map(|d| d.to_chrono()),
        }
    }
}

impl From<MongoSession> for SessionRecord {
    fn from(doc: MongoSession) -> Self {
        Self {
            token: doc.token,
            user_id: id_to_string(&doc.user_id),
            expires_at: doc.expires_at.to_chrono(),
        }
    }
}
