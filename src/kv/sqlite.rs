use async_trait::async_trait;
use rusqlite::params;

use crate::db::DbPool;
use crate::kv::{KeyValueStore, KvError};

/// SQLite-backed key-value store: one row per key in `kv_entries`.
pub struct SqliteKv {
    pool: DbPool,
}

impl SqliteKv {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKv {
    async fn read(&self, key: &str) -> Result<Option<String>, KvError> {
        let conn = self.pool.get()?;

        let result: Result<String, rusqlite::Error> = conn.query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), KvError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
               value = excluded.value,
               updated_at = excluded.updated_at",
            params![key, value],
        )?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        let conn = self.pool.get()?;

        conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }
}
