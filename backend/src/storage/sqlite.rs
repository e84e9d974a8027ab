//! SQLite-backed blob store.
//!
//! All blobs live in a single `blobs (key, value)` table; a write replaces the
//! row for its key with `INSERT OR REPLACE`, so every `set` is one atomic
//! statement.

use common::storage::BlobStore;
use common::StorageError;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct SqliteBlobStore {
    conn: Mutex<Connection>,
}

impl SqliteBlobStore {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS blobs (key TEXT PRIMARY KEY, value BLOB NOT NULL)",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.conn
            .lock()
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(StorageError::backend)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute(
                "INSERT OR REPLACE INTO blobs (key, value) VALUES (?1, ?2)",
                params![key, bytes],
            )
            .map(|_| ())
            .map_err(StorageError::backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::field::{FieldSpec, FieldType};
    use common::FormsState;
    use std::sync::Arc;

    #[test]
    fn missing_key_reads_as_none() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.get("templates").unwrap(), None);
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        store.set("k", b"first").unwrap();
        store.set("k", b"second").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn templates_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.sqlite");

        let saved = {
            let store = SqliteBlobStore::open(&path).unwrap();
            let mut state = FormsState::open(Arc::new(store));
            let mut session = state.begin_new_template();
            session.rename_template("Intake");
            let section_id = session.template().sections[0].id.clone();
            session
                .add_field(&section_id, FieldSpec::new(FieldType::Text, "Name"))
                .unwrap();
            state.commit(&mut session).unwrap();
            state.templates().list().to_vec()
        };

        let reopened = FormsState::open(Arc::new(SqliteBlobStore::open(&path).unwrap()));
        assert_eq!(reopened.templates().list(), saved.as_slice());
    }
}
