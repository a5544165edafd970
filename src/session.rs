// Explicit session object over the persisted `user` slot. Presence of the
// slot is the sole authentication signal: there is no token and no expiry.
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::records::{ProfileUpdate, PublicUser};
use crate::store::{RecordStore, KEY_SESSION};

pub struct AuthSession {
    store: Arc<RecordStore>,
    current: Mutex<Option<PublicUser>>,
}

impl AuthSession {
    /// Initialize from the persisted session slot: logged in when a
    /// well-formed cached user is present, logged out otherwise. An
    /// unreadable or malformed cache is treated as logged out, not an error.
    pub async fn load(store: Arc<RecordStore>) -> Self {
        let cached = match store.kv().read(KEY_SESSION).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Failed to parse cached session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to load cached session: {}", e);
                None
            }
        };

        Self {
            store,
            current: Mutex::new(cached),
        }
    }

    /// Who is currently logged in, if anyone.
    pub async fn current_user(&self) -> Option<PublicUser> {
        self.current.lock().await.clone()
    }

    /// Log in with an exact username+password match. On a miss the session
    /// stays untouched and [`StoreError::InvalidCredentials`] is returned.
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<PublicUser> {
        let Some(user) = self.store.find_by_credentials(username, password).await else {
            return Err(StoreError::InvalidCredentials);
        };

        self.cache_session(&user).await?;
        Ok(user)
    }

    /// Create an account and log straight in. Fails with
    /// [`StoreError::DuplicateUsername`] when the username is taken; the
    /// session is only cached after the account has been persisted.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
    ) -> StoreResult<PublicUser> {
        let user = self.store.create_user(username, password, display_name).await?;
        self.cache_session(&user).await?;
        Ok(user)
    }

    /// Log out unconditionally. The in-memory state is cleared even when
    /// removing the persisted slot fails.
    pub async fn logout(&self) -> StoreResult<()> {
        *self.current.lock().await = None;
        self.store
            .kv()
            .remove(KEY_SESSION)
            .await
            .map_err(StoreError::StorageWrite)
    }

    /// Merge a profile edit into the session cache and the matching account
    /// record, in that order. No-op returning `None` when logged out.
    pub async fn update_profile(&self, updates: ProfileUpdate) -> StoreResult<Option<PublicUser>> {
        let mut guard = self.current.lock().await;
        let Some(user) = guard.as_ref() else {
            return Ok(None);
        };

        let mut updated = user.clone();
        updates.apply_to(&mut updated);

        let json = serde_json::to_string(&updated)?;
        self.store
            .kv()
            .write(KEY_SESSION, &json)
            .await
            .map_err(StoreError::StorageWrite)?;
        *guard = Some(updated.clone());
        drop(guard);

        self.store.apply_profile_update(&updated.id, &updates).await?;
        Ok(Some(updated))
    }

    async fn cache_session(&self, user: &PublicUser) -> StoreResult<()> {
        let json = serde_json::to_string(user)?;
        self.store
            .kv()
            .write(KEY_SESSION, &json)
            .await
            .map_err(StoreError::StorageWrite)?;
        *self.current.lock().await = Some(user.clone());
        Ok(())
    }
}
