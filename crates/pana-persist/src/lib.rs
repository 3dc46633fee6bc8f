pub mod dbs;
pub mod error;
pub mod memory;
pub mod models;
pub mod trait_client;

pub use error::{PersistError, Result};
pub use memory::InMemoryPersistence;
pub use models::{ProfileUpdate, SessionRecord, UpsertOutcome, SESSION_COOKIE};
pub use trait_client::PersistenceClient;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoPersistenceClient;
