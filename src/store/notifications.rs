use crate::records::Notification;
use crate::store::{notifications_key, RecordStore};

impl RecordStore {
    /// A user's notifications, newest-first. Read failures are masked as an
    /// empty list.
    pub async fn get_notifications(&self, user_id: &str) -> Vec<Notification> {
        let mut guard = self.notifications_mirror().await;
        if let Some(cached) = guard.get(user_id) {
            return cached.clone();
        }
        let list = self.load_list(&notifications_key(user_id)).await;
        guard.insert(user_id.to_string(), list.clone());
        list
    }

    /// Prepend a notification to the owner's list. Best-effort: delivery
    /// failures are logged, never surfaced.
    pub async fn add_notification(&self, user_id: &str, notification: Notification) {
        let mut guard = self.notifications_mirror().await;
        let mut list = match guard.get(user_id) {
            Some(cached) => cached.clone(),
            None => self.load_list(&notifications_key(user_id)).await,
        };

        list.insert(0, notification);

        match self.persist(&notifications_key(user_id), &list).await {
            Ok(()) => {
                guard.insert(user_id.to_string(), list);
            }
            Err(e) => {
                tracing::error!("Failed to add notification for {}: {}", user_id, e);
            }
        }
    }

    /// Mark every notification in the owner's list as read. Idempotent and
    /// best-effort.
    pub async fn mark_notifications_read(&self, user_id: &str) {
        let mut guard = self.notifications_mirror().await;
        let mut list = match guard.get(user_id) {
            Some(cached) => cached.clone(),
            None => self.load_list(&notifications_key(user_id)).await,
        };

        for notification in &mut list {
            notification.read = true;
        }

        match self.persist(&notifications_key(user_id), &list).await {
            Ok(()) => {
                guard.insert(user_id.to_string(), list);
            }
            Err(e) => {
                tracing::error!("Failed to mark notifications read for {}: {}", user_id, e);
            }
        }
    }
}
