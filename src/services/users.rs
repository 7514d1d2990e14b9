use std::sync::Arc;

use log::{debug, info};

use super::{ServiceError, ServiceResult};
use crate::backend::Backend;
use crate::models::{FriendshipStatus, User};

/// Finding people to befriend.
pub struct UserSearch {
    backend: Arc<dyn Backend>,
    results: Vec<User>,
}

impl UserSearch {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[User] {
        &self.results
    }

    /// Search users by name. A blank query clears the results without a request.
    pub async fn search(&mut self, query: &str) -> ServiceResult<&[User]> {
        let query = query.trim();
        if query.is_empty() {
            self.results.clear();
            return Ok(&self.results);
        }
        self.results = self.backend.search_users(query).await?;
        debug!("Search '{query}' returned {} users", self.results.len());
        Ok(&self.results)
    }

    pub fn can_send_request(user: &User) -> bool {
        user.can_send_request()
    }

    /// Send a friend request; the matching search result becomes `pending_sent`.
    pub async fn send_request(&mut self, user_id: i64) -> ServiceResult<()> {
        if let Some(user) = self.results.iter().find(|u| u.id == user_id) {
            if !user.can_send_request() {
                return Err(ServiceError::Validation(format!(
                    "A friend request to {} is not possible",
                    user.username
                )));
            }
        }
        self.backend.send_friend_request(user_id).await?;
        if let Some(user) = self.results.iter_mut().find(|u| u.id == user_id) {
            user.friendship_status = FriendshipStatus::PendingSent;
        }
        info!("✅ Sent friend request to user {user_id}");
        Ok(())
    }
}
