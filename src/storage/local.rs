//! Local storage backends.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::SereneError;

/// A string key/value store.
#[cfg_attr(test, mockall::automock)]
pub trait StorageBackend {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, SereneError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), SereneError>;

    /// Delete `key`. Returns true if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<bool, SereneError>;
}

/// Backend persisted in the `local_storage` table.
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }
}

impl StorageBackend for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SereneError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| SereneError::Database(format!("Failed to read '{key}': {e}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SereneError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO local_storage (key, value, updated_at)
                  VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| SereneError::Database(format!("Failed to write '{key}': {e}")))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool, SereneError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])
            .map_err(|e| SereneError::Database(format!("Failed to delete '{key}': {e}")))?;
        Ok(rows > 0)
    }
}

/// Backend held in memory; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SereneError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SereneError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool, SereneError> {
        Ok(self.items.borrow_mut().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(storage: &dyn StorageBackend) {
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "one").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("one"));

        storage.set_item("k", "two").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));

        assert!(storage.remove_item("k").unwrap());
        assert!(!storage.remove_item("k").unwrap());
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_memory_storage() {
        exercise(&MemoryStorage::new());
    }

    #[test]
    fn test_sqlite_storage() {
        let db = Database::open_in_memory().unwrap();
        exercise(&SqliteStorage::with_database(db));
    }

    #[test]
    fn test_sqlite_storage_persists_across_connections() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("serene.db");

        {
            let storage = SqliteStorage::with_database(Database::open_at(&path).unwrap());
            storage.set_item("serene-storage", r#"{"volume":0.5}"#).unwrap();
        }

        let storage = SqliteStorage::with_database(Database::open_at(&path).unwrap());
        assert_eq!(
            storage.get_item("serene-storage").unwrap().as_deref(),
            Some(r#"{"volume":0.5}"#)
        );
    }
}
