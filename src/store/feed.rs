// Engagement operations: what the feed and post-detail surfaces call.
// These compose the collection primitives and own the notification fan-out
// rules (never for a self-action, never for removing a like).
use crate::error::StoreResult;
use crate::records::{Comment, Notification, Post, PublicUser};
use crate::store::posts::LikeChange;
use crate::store::RecordStore;

impl RecordStore {
    /// Create and persist a post authored by `author`, returning it.
    pub async fn compose_post(
        &self,
        author: &PublicUser,
        caption: &str,
        image_uri: Option<String>,
    ) -> StoreResult<Post> {
        let post = Post::compose(author, caption, image_uri);
        self.save_post(post.clone()).await?;
        Ok(post)
    }

    /// Toggle `actor`'s like on a post. When the toggle added a like and the
    /// post belongs to someone else, a like notification is delivered to the
    /// owner best-effort. Returns `None` on an unknown post id.
    pub async fn like_post(
        &self,
        post_id: &str,
        actor: &PublicUser,
    ) -> StoreResult<Option<LikeChange>> {
        let owner_id = match self.get_post(post_id).await {
            Some(post) => post.user_id,
            None => return Ok(None),
        };

        let Some(change) = self.toggle_like_inner(post_id, &actor.id).await? else {
            return Ok(None);
        };

        if change == LikeChange::Added && owner_id != actor.id {
            self.add_notification(&owner_id, Notification::like(actor, post_id))
                .await;
        }

        Ok(Some(change))
    }

    /// Comment on a post as `actor`. Text is trimmed; whitespace-only input
    /// is a no-op. A comment notification carrying the text goes to the
    /// owner best-effort unless the actor owns the post. Returns the created
    /// comment, `None` on unknown post or empty text.
    pub async fn comment_on_post(
        &self,
        post_id: &str,
        actor: &PublicUser,
        text: &str,
    ) -> StoreResult<Option<Comment>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let owner_id = match self.get_post(post_id).await {
            Some(post) => post.user_id,
            None => return Ok(None),
        };

        let comment = Comment::written_by(actor, text);
        self.add_comment(post_id, comment.clone()).await?;

        if owner_id != actor.id {
            self.add_notification(&owner_id, Notification::comment(actor, post_id, text))
                .await;
        }

        Ok(Some(comment))
    }
}
