mod feed;
mod notifications;
mod posts;
mod users;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::db;
use crate::error::{StoreError, StoreResult};
use crate::kv::{KeyValueStore, SqliteKv};
use crate::records::{Notification, Post, User};

pub use self::posts::LikeChange;

pub(crate) const KEY_USERS: &str = "users";
pub(crate) const KEY_POSTS: &str = "posts";
pub(crate) const KEY_SESSION: &str = "user";

pub(crate) fn notifications_key(user_id: &str) -> String {
    format!("notifications:{}", user_id)
}

/// Durable store of the three record collections.
///
/// Each collection is guarded by its own mutex around an in-memory mirror
/// that is the sole writer to its persistent key: mutations build the updated
/// collection, persist it, and commit it to the mirror only on write success,
/// so a failed write leaves both disk and mirror on the previous state.
pub struct RecordStore {
    kv: Arc<dyn KeyValueStore>,
    posts: Mutex<Option<Vec<Post>>>,
    users: Mutex<Option<Vec<User>>>,
    /// Per-owner notification lists, loaded lazily. An absent entry means
    /// that owner's key has not been read yet.
    notifications: Mutex<HashMap<String, Vec<Notification>>>,
}

impl RecordStore {
    /// Open the store over the SQLite backend resolved from `config`.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let pool = db::create_pool(config.db_path())?;
        db::run_migrations(&pool)?;
        Ok(Self::with_backend(Arc::new(SqliteKv::new(pool))))
    }

    /// Build the store over any key-value backend.
    pub fn with_backend(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            posts: Mutex::new(None),
            users: Mutex::new(None),
            notifications: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn kv(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    pub(crate) async fn posts_mirror(&self) -> tokio::sync::MutexGuard<'_, Option<Vec<Post>>> {
        self.posts.lock().await
    }

    pub(crate) async fn users_mirror(&self) -> tokio::sync::MutexGuard<'_, Option<Vec<User>>> {
        self.users.lock().await
    }

    pub(crate) async fn notifications_mirror(
        &self,
    ) -> tokio::sync::MutexGuard<'_, HashMap<String, Vec<Notification>>> {
        self.notifications.lock().await
    }

    /// Load a collection from the backend. Absent or unparseable values are
    /// masked as empty: a transient read failure looks the same as "no data
    /// exists yet".
    pub(crate) async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.kv.read(key).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                return Vec::new();
            }
        };

        match raw {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {}: {}", key, e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    /// Serialize and write a whole collection back under its key.
    pub(crate) async fn persist<T: Serialize>(&self, key: &str, list: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string(list)?;
        self.kv
            .write(key, &json)
            .await
            .map_err(StoreError::StorageWrite)
    }
}
