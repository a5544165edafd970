use rand::Rng;

use crate::error::{StoreError, StoreResult};
use crate::records::{timestamp_id, ProfileUpdate, PublicUser, User, AVATAR_COUNT};
use crate::store::{RecordStore, KEY_USERS};

impl RecordStore {
    /// Search accounts by case-insensitive substring on username or display
    /// name. An empty query returns every account. Passwords never leave
    /// the store.
    pub async fn search_users(&self, query: &str) -> Vec<PublicUser> {
        let users = self.all_users().await;

        if query.is_empty() {
            return users.iter().map(User::public).collect();
        }

        let needle = query.to_lowercase();
        users
            .iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .map(User::public)
            .collect()
    }

    /// Look up an account by id, password stripped. `None` when absent.
    pub async fn get_user_by_id(&self, user_id: &str) -> Option<PublicUser> {
        self.all_users()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .map(User::public)
    }

    /// Scan for an exact username+password match. Used by login only; the
    /// comparison is cleartext by design of the original record format.
    pub(crate) async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Option<PublicUser> {
        self.all_users()
            .await
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(User::public)
    }

    /// Create a new account. Fails with [`StoreError::DuplicateUsername`]
    /// when the username is already taken (case-sensitive exact match),
    /// leaving the collection untouched.
    pub(crate) async fn create_user(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
    ) -> StoreResult<PublicUser> {
        let mut guard = self.users_mirror().await;
        let mut users = match &*guard {
            Some(cached) => cached.clone(),
            None => self.load_list(KEY_USERS).await,
        };

        if users.iter().any(|u| u.username == username) {
            *guard = Some(users);
            return Err(StoreError::DuplicateUsername);
        }

        let user = User {
            id: timestamp_id(),
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
            bio: String::new(),
            avatar_index: rand::thread_rng().gen_range(0..AVATAR_COUNT),
        };
        let public = user.public();
        users.push(user);

        self.persist(KEY_USERS, &users).await?;
        *guard = Some(users);
        Ok(public)
    }

    /// Merge a profile edit into the matching account. Silently no-ops when
    /// no account has `user_id`.
    pub(crate) async fn apply_profile_update(
        &self,
        user_id: &str,
        updates: &ProfileUpdate,
    ) -> StoreResult<()> {
        let mut guard = self.users_mirror().await;
        let mut users = match &*guard {
            Some(cached) => cached.clone(),
            None => self.load_list(KEY_USERS).await,
        };

        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            *guard = Some(users);
            return Ok(());
        };

        if let Some(ref display_name) = updates.display_name {
            user.display_name = display_name.clone();
        }
        if let Some(ref bio) = updates.bio {
            user.bio = bio.clone();
        }
        if let Some(avatar_index) = updates.avatar_index {
            user.avatar_index = avatar_index;
        }

        self.persist(KEY_USERS, &users).await?;
        *guard = Some(users);
        Ok(())
    }

    async fn all_users(&self) -> Vec<User> {
        let mut guard = self.users_mirror().await;
        if let Some(cached) = &*guard {
            return cached.clone();
        }
        let users = self.load_list(KEY_USERS).await;
        *guard = Some(users.clone());
        users
    }
}
