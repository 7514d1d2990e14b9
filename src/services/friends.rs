use std::sync::Arc;

use log::{error, info};

use super::ServiceResult;
use crate::backend::Backend;
use crate::models::{FriendRequest, Friendship};

/// Friends and incoming friend requests.
pub struct FriendsService {
    backend: Arc<dyn Backend>,
    friends: Vec<Friendship>,
    requests: Vec<FriendRequest>,
}

impl FriendsService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            friends: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn friends(&self) -> &[Friendship] {
        &self.friends
    }

    pub fn requests(&self) -> &[FriendRequest] {
        &self.requests
    }

    pub async fn load_friends(&mut self) -> ServiceResult<&[Friendship]> {
        self.friends = self.backend.fetch_friends().await.map_err(|e| {
            error!("❌ Failed to fetch friends: {e}");
            e
        })?;
        Ok(&self.friends)
    }

    pub async fn load_requests(&mut self) -> ServiceResult<&[FriendRequest]> {
        self.requests = self.backend.fetch_friend_requests().await.map_err(|e| {
            error!("❌ Failed to fetch friend requests: {e}");
            e
        })?;
        Ok(&self.requests)
    }

    pub async fn remove_friend(&mut self, user_id: i64) -> ServiceResult<()> {
        self.backend.remove_friend(user_id).await?;
        self.friends.retain(|f| f.friend.id != user_id);
        info!("✅ Removed friend {user_id}");
        Ok(())
    }

    pub async fn accept(&mut self, request_id: i64) -> ServiceResult<()> {
        self.backend.accept_friend_request(request_id).await?;
        self.requests.retain(|r| r.id != request_id);
        info!("✅ Accepted friend request {request_id}");
        self.load_friends().await?;
        Ok(())
    }

    pub async fn reject(&mut self, request_id: i64) -> ServiceResult<()> {
        self.backend.reject_friend_request(request_id).await?;
        self.requests.retain(|r| r.id != request_id);
        info!("Rejected friend request {request_id}");
        Ok(())
    }
}
