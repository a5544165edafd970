// Primitive key-value contract - isolates all persistence side effects.
// The record store only ever sees whole-value read/write/remove per key;
// there are no transactions and no compare-and-swap.
mod memory;
mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

pub use self::memory::MemoryKv;
pub use self::sqlite::SqliteKv;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("Database error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Asynchronous whole-value store of JSON strings under string keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when the key is absent.
    async fn read(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), KvError>;
}
