//! Read-only access to the collection database inside an export archive.

pub mod card_repo;
pub mod connection;
pub mod deck_repo;
pub mod models;

pub use connection::CollectionDb;
pub use models::{Card, Deck};
