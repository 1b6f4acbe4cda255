//! PostgreSQL adapters.

mod idea_store;

pub use idea_store::PostgresIdeaStore;
