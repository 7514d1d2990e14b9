use std::sync::Arc;

use log::{error, info};

use super::ServiceResult;
use crate::backend::Backend;
use crate::models::Notification;

/// The notification inbox.
///
/// Mutations hit the API first; local state only changes once the server
/// accepted them, so a failed call leaves the inbox as it was.
pub struct NotificationCenter {
    backend: Arc<dyn Backend>,
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            notifications: Vec::new(),
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub async fn refresh(&mut self) -> ServiceResult<&[Notification]> {
        self.notifications = self.backend.fetch_notifications().await.map_err(|e| {
            error!("❌ Failed to fetch notifications: {e}");
            e
        })?;
        Ok(&self.notifications)
    }

    pub async fn mark_read(&mut self, notification_id: i64) -> ServiceResult<()> {
        if let Err(e) = self.backend.mark_notification_read(notification_id).await {
            error!("❌ Failed to mark notification {notification_id} as read: {e}");
            return Err(e.into());
        }
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == notification_id) {
            n.read = true;
        }
        Ok(())
    }

    pub async fn mark_all_read(&mut self) -> ServiceResult<()> {
        if let Err(e) = self.backend.mark_all_notifications_read().await {
            error!("❌ Failed to mark notifications as read: {e}");
            return Err(e.into());
        }
        for n in &mut self.notifications {
            n.read = true;
        }
        info!("✅ All notifications marked as read");
        Ok(())
    }

    pub async fn delete(&mut self, notification_id: i64) -> ServiceResult<()> {
        if let Err(e) = self.backend.delete_notification(notification_id).await {
            error!("❌ Failed to delete notification {notification_id}: {e}");
            return Err(e.into());
        }
        self.notifications.retain(|n| n.id != notification_id);
        Ok(())
    }
}
