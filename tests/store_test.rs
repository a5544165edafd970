// End-to-end scenarios over a real on-disk SQLite backend: the full
// signup -> post -> like -> comment -> notification flow, plus restart
// behavior of both collections and the session slot.
use std::sync::Arc;

use localfeed::records::{NotificationKind, ProfileUpdate};
use localfeed::{AuthSession, Config, LikeChange, RecordStore, StoreError};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn open_store(temp_dir: &TempDir) -> (Arc<RecordStore>, Config) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let config = Config::load(None, Some(temp_dir.path())).expect("Failed to load config");
    let store = RecordStore::open(&config).expect("Failed to open store");
    (Arc::new(store), config)
}

#[tokio::test]
async fn test_signup_login_post_like_comment_flow() {
    let temp_dir = TempDir::new().unwrap();
    let (store, _config) = open_store(&temp_dir);
    let session = AuthSession::load(store.clone()).await;

    // Alice signs up and posts.
    let alice = session.signup("alice", "secret1", "Alice A").await.unwrap();
    assert_eq!(alice.bio, "");
    let p1 = store.compose_post(&alice, "hello world", None).await.unwrap();

    // A second signup under the same username fails.
    let err = session.signup("alice", "whatever", "Other").await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateUsername));

    // Bob signs up (on his own session) and posts after Alice.
    let bob_session = AuthSession::load(store.clone()).await;
    let bob = bob_session.signup("bob", "secret2", "Bob B").await.unwrap();
    let p2 = store.compose_post(&bob, "second post", None).await.unwrap();

    // Feed is newest-first.
    let posts = store.get_posts().await;
    assert_eq!(posts[0].id, p2.id);
    assert_eq!(posts[1].id, p1.id);

    // Bob likes Alice's post: like recorded, Alice notified.
    assert_eq!(
        store.like_post(&p1.id, &bob).await.unwrap(),
        Some(LikeChange::Added)
    );
    assert_eq!(store.get_posts().await[1].likes, vec![bob.id.clone()]);

    // Toggling again removes the like but the notification stays.
    assert_eq!(
        store.like_post(&p1.id, &bob).await.unwrap(),
        Some(LikeChange::Removed)
    );
    assert!(store.get_posts().await[1].likes.is_empty());

    // Bob comments twice; order is append order.
    store.comment_on_post(&p1.id, &bob, "first!").await.unwrap();
    store.comment_on_post(&p1.id, &bob, "me again").await.unwrap();
    let comments = store.get_post(&p1.id).await.unwrap().comments;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "first!");
    assert_eq!(comments[1].text, "me again");

    // Alice's inbox: newest-first, like + two comments, none from herself.
    let inbox = store.get_notifications(&alice.id).await;
    assert_eq!(inbox.len(), 3);
    assert_eq!(inbox[0].kind, NotificationKind::Comment);
    assert_eq!(inbox[0].text.as_deref(), Some("me again"));
    assert_eq!(inbox[2].kind, NotificationKind::Like);
    assert!(inbox.iter().all(|n| n.from_user_id == bob.id));
    assert!(inbox.iter().all(|n| !n.read));

    // Mark-all-read is idempotent.
    store.mark_notifications_read(&alice.id).await;
    store.mark_notifications_read(&alice.id).await;
    assert!(store
        .get_notifications(&alice.id)
        .await
        .iter()
        .all(|n| n.read));

    // Bob received nothing.
    assert!(store.get_notifications(&bob.id).await.is_empty());
}

#[tokio::test]
async fn test_state_survives_reopening_the_database() {
    let temp_dir = TempDir::new().unwrap();

    let alice_id;
    {
        let (store, _config) = open_store(&temp_dir);
        let session = AuthSession::load(store.clone()).await;
        let alice = session.signup("alice", "secret1", "Alice A").await.unwrap();
        alice_id = alice.id.clone();

        store.compose_post(&alice, "persisted", None).await.unwrap();
        session
            .update_profile(ProfileUpdate {
                bio: Some("still here".into()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    // Fresh pool, fresh mirrors, same database file.
    let (store, _config) = open_store(&temp_dir);
    let session = AuthSession::load(store.clone()).await;

    let current = session.current_user().await.expect("session should persist");
    assert_eq!(current.id, alice_id);
    assert_eq!(current.bio, "still here");

    let posts = store.get_posts().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].caption, "persisted");

    // The account record carries the profile edit too.
    let record = store.get_user_by_id(&alice_id).await.unwrap();
    assert_eq!(record.bio, "still here");

    // Logout clears the slot for the next process start.
    session.logout().await.unwrap();
    let restored = AuthSession::load(store.clone()).await;
    assert!(restored.current_user().await.is_none());
}

#[tokio::test]
async fn test_denormalized_snapshots_do_not_follow_profile_edits() {
    let temp_dir = TempDir::new().unwrap();
    let (store, _config) = open_store(&temp_dir);
    let session = AuthSession::load(store.clone()).await;

    let alice = session.signup("alice", "secret1", "Alice A").await.unwrap();
    let post = store.compose_post(&alice, "frozen in time", None).await.unwrap();
    store.comment_on_post(&post.id, &alice, "signed, Alice A").await.unwrap();

    session
        .update_profile(ProfileUpdate {
            display_name: Some("Alice Prime".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    // The post and comment keep the identity as of the time of the action.
    let stored = store.get_post(&post.id).await.unwrap();
    assert_eq!(stored.display_name, "Alice A");
    assert_eq!(stored.comments[0].display_name, "Alice A");

    // Search sees the live record.
    let results = store.search_users("prime").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].display_name, "Alice Prime");
}

#[tokio::test]
async fn test_search_users_over_disk_backend() {
    let temp_dir = TempDir::new().unwrap();
    let (store, _config) = open_store(&temp_dir);
    let session = AuthSession::load(store.clone()).await;

    session.signup("alice", "s1", "Alice A").await.unwrap();
    session.logout().await.unwrap();
    session.signup("bob", "s2", "Bobby Tables").await.unwrap();
    session.logout().await.unwrap();

    assert_eq!(store.search_users("").await.len(), 2);
    assert_eq!(store.search_users("ALICE").await.len(), 1);
    assert_eq!(store.search_users("tables").await.len(), 1);
    assert!(store.search_users("carol").await.is_empty());
}
