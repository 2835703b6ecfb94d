//! Storage layer for serene.
//!
//! Saved state lives in a small key/value store modelled on browser local
//! storage: each key maps to one serialized blob. The default backend keeps
//! it in `SQLite`; an in-memory backend is available for tests and
//! embedding.

mod database;
mod local;
mod migrations;

pub use database::Database;
pub use local::{MemoryStorage, SqliteStorage, StorageBackend};

#[cfg(test)]
pub use local::MockStorageBackend;
