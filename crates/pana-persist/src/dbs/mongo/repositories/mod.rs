pub mod explanation;
pub mod preferences;
pub mod session;
pub mod user;

pub use explanation::MongoExplanationRepository;
pub use preferences::MongoPreferencesRepository;
pub use session::MongoSessionRepository;
pub use user::MongoUserRepository;
