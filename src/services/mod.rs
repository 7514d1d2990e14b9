//! Screen-level services.
//!
//! Each service owns the state one screen of the app needs and talks to the
//! remote service through a shared `dyn Backend`.

use crate::backend::BackendError;
use crate::session::SessionError;

pub mod auth;
pub mod friends;
pub mod home;
pub mod list_detail;
pub mod notifications;
pub mod users;

pub use auth::AuthService;
pub use friends::FriendsService;
pub use home::HomeService;
pub use list_detail::{BulkDeleteReport, ListService};
pub use notifications::NotificationCenter;
pub use users::UserSearch;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Session storage failed: {0}")]
    Session(String),
}

impl From<SessionError> for ServiceError {
    fn from(e: SessionError) -> Self {
        ServiceError::Session(e.to_string())
    }
}

impl ServiceError {
    pub(crate) fn validation(message: &str) -> Self {
        ServiceError::Validation(message.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
