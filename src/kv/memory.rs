use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::kv::{KeyValueStore, KvError};

/// In-memory backend for unit tests. Optionally fails every write to
/// exercise the error paths.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose writes always fail with a backend error.
    pub fn failing_writes() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    /// Seed a key directly, bypassing the failure switch.
    pub async fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn read(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), KvError> {
        if self.fail_writes {
            return Err(KvError::Backend("write failure injected".to_string()));
        }
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
