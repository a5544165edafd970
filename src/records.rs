// Domain records - plain serde structs persisted as JSON arrays.
// Field names serialize as the original camelCase wire names so the
// on-disk layout stays compatible with what the app always wrote.
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Number of built-in avatar images; `avatar_index` is always in `0..AVATAR_COUNT`.
pub const AVATAR_COUNT: u8 = 5;

/// Record ids are the creation timestamp in epoch milliseconds, as a decimal
/// string. Not collision-proof under concurrent creation; acceptable for a
/// single-writer on-device store.
pub fn timestamp_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Full account record, including the cleartext password.
/// Only ever persisted under the `users` key; everything handed out of the
/// store is the [`PublicUser`] projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_index: u8,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            bio: self.bio.clone(),
            avatar_index: self.avatar_index,
        }
    }
}

/// Password-stripped projection of [`User`] - the only user shape that
/// crosses the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_index: u8,
}

/// Partial profile edit applied to both the session cache and the matching
/// `users` entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_index: Option<u8>,
}

impl ProfileUpdate {
    pub fn apply_to(&self, user: &mut PublicUser) {
        if let Some(ref display_name) = self.display_name {
            user.display_name = display_name.clone();
        }
        if let Some(ref bio) = self.bio {
            user.bio = bio.clone();
        }
        if let Some(avatar_index) = self.avatar_index {
            user.avatar_index = avatar_index;
        }
    }
}

/// A feed post. `username`/`display_name`/`avatar_index` are snapshots of the
/// poster at creation time and are never updated retroactively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub avatar_index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    pub caption: String,
    /// User ids, set semantics, insertion order = like order.
    pub likes: Vec<String>,
    /// Oldest-first, append-only.
    pub comments: Vec<Comment>,
    pub created_at: i64,
}

impl Post {
    /// Build a fresh post authored by `author`, with empty likes/comments.
    pub fn compose(author: &PublicUser, caption: impl Into<String>, image_uri: Option<String>) -> Self {
        Self {
            id: timestamp_id(),
            user_id: author.id.clone(),
            username: author.username.clone(),
            display_name: author.display_name.clone(),
            avatar_index: author.avatar_index,
            image_uri,
            caption: caption.into(),
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now_millis(),
        }
    }
}

/// Comment embedded in a post - a denormalized snapshot of the commenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub avatar_index: u8,
    pub text: String,
    pub created_at: i64,
}

impl Comment {
    pub fn written_by(actor: &PublicUser, text: impl Into<String>) -> Self {
        Self {
            id: timestamp_id(),
            user_id: actor.id.clone(),
            username: actor.username.clone(),
            display_name: actor.display_name.clone(),
            avatar_index: actor.avatar_index,
            text: text.into(),
            created_at: now_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
}

/// Per-user notification. Lists are stored newest-first under
/// `notifications:<ownerUserId>` and are append-by-prepend only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub from_user_id: String,
    pub from_username: String,
    pub from_display_name: String,
    pub from_avatar_index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub created_at: i64,
    pub read: bool,
}

impl Notification {
    pub fn like(actor: &PublicUser, post_id: &str) -> Self {
        Self::from_action(actor, NotificationKind::Like, Some(post_id.to_string()), None)
    }

    pub fn comment(actor: &PublicUser, post_id: &str, text: &str) -> Self {
        Self::from_action(
            actor,
            NotificationKind::Comment,
            Some(post_id.to_string()),
            Some(text.to_string()),
        )
    }

    fn from_action(
        actor: &PublicUser,
        kind: NotificationKind,
        post_id: Option<String>,
        text: Option<String>,
    ) -> Self {
        Self {
            id: timestamp_id(),
            kind,
            from_user_id: actor.id.clone(),
            from_username: actor.username.clone(),
            from_display_name: actor.display_name.clone(),
            from_avatar_index: actor.avatar_index,
            post_id,
            text,
            created_at: now_millis(),
            read: false,
        }
    }
}
