use crate::error::StoreResult;
use crate::records::{Comment, Post};
use crate::store::{RecordStore, KEY_POSTS};

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeChange {
    Added,
    Removed,
}

impl RecordStore {
    /// All posts, newest-first. Read failures are masked as an empty feed.
    pub async fn get_posts(&self) -> Vec<Post> {
        let mut guard = self.posts_mirror().await;
        if let Some(cached) = &*guard {
            return cached.clone();
        }
        let posts = self.load_list(KEY_POSTS).await;
        *guard = Some(posts.clone());
        posts
    }

    /// Look up a single post by id.
    pub async fn get_post(&self, post_id: &str) -> Option<Post> {
        self.get_posts().await.into_iter().find(|p| p.id == post_id)
    }

    /// Prepend a fully-formed post to the feed and persist it.
    pub async fn save_post(&self, post: Post) -> StoreResult<()> {
        let mut guard = self.posts_mirror().await;
        let mut posts = match &*guard {
            Some(cached) => cached.clone(),
            None => self.load_list(KEY_POSTS).await,
        };

        posts.insert(0, post);

        self.persist(KEY_POSTS, &posts).await?;
        *guard = Some(posts);
        Ok(())
    }

    /// Toggle `user_id`'s membership in the post's like list: add if absent,
    /// remove if present. Silently no-ops on an unknown post id.
    pub async fn toggle_like(&self, post_id: &str, user_id: &str) -> StoreResult<()> {
        self.toggle_like_inner(post_id, user_id).await.map(|_| ())
    }

    /// Like [`toggle_like`](Self::toggle_like), reporting which way the
    /// toggle went. `None` when the post does not exist.
    pub(crate) async fn toggle_like_inner(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> StoreResult<Option<LikeChange>> {
        let mut guard = self.posts_mirror().await;
        let mut posts = match &*guard {
            Some(cached) => cached.clone(),
            None => self.load_list(KEY_POSTS).await,
        };

        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            *guard = Some(posts);
            return Ok(None);
        };

        let change = match post.likes.iter().position(|id| id == user_id) {
            Some(index) => {
                post.likes.remove(index);
                LikeChange::Removed
            }
            None => {
                post.likes.push(user_id.to_string());
                LikeChange::Added
            }
        };

        self.persist(KEY_POSTS, &posts).await?;
        *guard = Some(posts);
        Ok(Some(change))
    }

    /// Append a comment to the post's comment list. Silently no-ops on an
    /// unknown post id; comments are never edited or removed afterwards.
    pub async fn add_comment(&self, post_id: &str, comment: Comment) -> StoreResult<()> {
        let mut guard = self.posts_mirror().await;
        let mut posts = match &*guard {
            Some(cached) => cached.clone(),
            None => self.load_list(KEY_POSTS).await,
        };

        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            *guard = Some(posts);
            return Ok(());
        };
        post.comments.push(comment);

        self.persist(KEY_POSTS, &posts).await?;
        *guard = Some(posts);
        Ok(())
    }
}
