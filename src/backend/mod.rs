//! Backend abstraction layer for the remote to-do service.
//!
//! This module defines the interface every remote data source must implement,
//! along with the request argument types and error handling. The services
//! only talk to a `dyn Backend`, which keeps them testable with an in-process
//! fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{
    Category, CurrentUser, FriendRequest, Friendship, ListColor, Notification, Share, SortOption, Theme, TodoList,
    TodoSortOrder, User,
};
use crate::session::SessionError;

pub mod factory;
pub mod rest;

pub use factory::create_backend;
pub use rest::RestBackend;

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Backend error: {0}")]
    Other(String),
}

impl BackendError {
    pub fn is_auth(&self) -> bool {
        matches!(self, BackendError::Auth(_))
    }
}

/// Result of a successful login.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<CurrentUser>,
    #[serde(default)]
    pub remember_me: bool,
}

/// Free-form acknowledgement returned by account endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default, alias = "detail")]
    pub message: Option<String>,
}

/// Arguments for creating or editing a list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListDraft {
    pub name: String,
    pub color: ListColor,
    pub category: Option<i64>,
}

/// Arguments for creating or editing a todo.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TodoDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Arguments for creating an account.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile fields to change; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Interface to the remote to-do service.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "rest").
    fn backend_type(&self) -> &str;

    // Authentication and account
    async fn login(&self, username: &str, password: &str, remember_me: bool) -> Result<LoginResponse, BackendError>;
    async fn current_user(&self) -> Result<CurrentUser, BackendError>;
    async fn register(&self, args: &RegisterArgs) -> Result<ApiMessage, BackendError>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiMessage, BackendError>;
    async fn request_password_reset(&self) -> Result<ApiMessage, BackendError>;
    async fn set_new_password(&self, uid: &str, token: &str, password: &str) -> Result<ApiMessage, BackendError>;
    async fn send_verification_email(&self) -> Result<ApiMessage, BackendError>;
    async fn deactivate_account(&self) -> Result<ApiMessage, BackendError>;
    async fn update_theme(&self, theme: Theme) -> Result<ApiMessage, BackendError>;
    async fn set_push_notifications(&self, enabled: bool) -> Result<ApiMessage, BackendError>;

    // Lists
    async fn fetch_lists(&self) -> Result<Vec<TodoList>, BackendError>;
    async fn fetch_list(&self, list_id: i64) -> Result<TodoList, BackendError>;
    async fn create_list(&self, draft: &ListDraft) -> Result<(), BackendError>;
    async fn update_list(&self, list_id: i64, draft: &ListDraft) -> Result<(), BackendError>;
    async fn delete_list(&self, list_id: i64) -> Result<(), BackendError>;
    async fn list_shares(&self, list_id: i64) -> Result<Vec<Share>, BackendError>;
    async fn set_todo_sort_order(&self, list_id: i64, order: TodoSortOrder) -> Result<(), BackendError>;

    // Preferences
    async fn list_sort_preference(&self) -> Result<SortOption, BackendError>;
    async fn set_list_sort_preference(&self, option: SortOption) -> Result<(), BackendError>;
    async fn category_sort_preference(&self) -> Result<bool, BackendError>;
    async fn set_category_sort_preference(&self, alphabetical: bool) -> Result<(), BackendError>;
    async fn selected_category(&self) -> Result<Option<i64>, BackendError>;
    async fn save_selected_category(&self, category_id: Option<i64>) -> Result<(), BackendError>;

    // Categories
    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError>;
    async fn create_category(&self, name: &str) -> Result<(), BackendError>;
    async fn update_category(&self, category_id: i64, name: &str) -> Result<(), BackendError>;
    async fn delete_category(&self, category_id: i64) -> Result<(), BackendError>;

    // Todos
    async fn create_todo(&self, list_id: i64, draft: &TodoDraft) -> Result<(), BackendError>;
    async fn update_todo(&self, todo_id: i64, draft: &TodoDraft) -> Result<(), BackendError>;
    async fn toggle_todo(&self, todo_id: i64) -> Result<(), BackendError>;
    async fn delete_todo(&self, todo_id: i64) -> Result<(), BackendError>;
    async fn move_todo(&self, todo_id: i64, target_list_id: i64) -> Result<(), BackendError>;

    // Friends and users
    async fn fetch_friends(&self) -> Result<Vec<Friendship>, BackendError>;
    async fn remove_friend(&self, user_id: i64) -> Result<(), BackendError>;
    async fn fetch_friend_requests(&self) -> Result<Vec<FriendRequest>, BackendError>;
    async fn send_friend_request(&self, user_id: i64) -> Result<(), BackendError>;
    async fn accept_friend_request(&self, request_id: i64) -> Result<(), BackendError>;
    async fn reject_friend_request(&self, request_id: i64) -> Result<(), BackendError>;
    async fn search_users(&self, query: &str) -> Result<Vec<User>, BackendError>;

    // Notifications
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, BackendError>;
    async fn mark_notification_read(&self, notification_id: i64) -> Result<(), BackendError>;
    async fn mark_all_notifications_read(&self) -> Result<(), BackendError>;
    async fn delete_notification(&self, notification_id: i64) -> Result<(), BackendError>;
}
