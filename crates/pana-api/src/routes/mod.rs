pub mod admin;
pub mod assessment;
pub mod chat;
pub mod explanation;
pub mod health;
pub mod summary;
pub mod user;
