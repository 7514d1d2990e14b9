use std::sync::Arc;

use log::{error, info, warn};

use super::{ServiceError, ServiceResult};
use crate::backend::{ApiMessage, Backend, ProfileUpdate, RegisterArgs};
use crate::models::{CurrentUser, Theme};
use crate::session::{Session, SessionStore};

/// Login, logout and account management.
pub struct AuthService {
    backend: Arc<dyn Backend>,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn Backend>, session: Arc<dyn SessionStore>) -> Self {
        Self { backend, session }
    }

    /// Log in and persist the returned token pair.
    pub async fn login(&self, username: &str, password: &str, remember_me: bool) -> ServiceResult<Option<CurrentUser>> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("Username and password are required"));
        }

        let response = self.backend.login(username, password, remember_me).await?;
        let theme = response.user.as_ref().and_then(|u| u.theme);
        self.session.save(&Session {
            access_token: Some(response.access),
            refresh_token: Some(response.refresh),
            remember_me: response.remember_me || remember_me,
            theme,
        })?;
        info!("✅ Logged in as {username}");
        Ok(response.user)
    }

    /// The logged-in user, or `None` when there is no usable session.
    ///
    /// An expired access token is refreshed by the backend; when that fails too
    /// the stale session is dropped.
    pub async fn current_user(&self) -> ServiceResult<Option<CurrentUser>> {
        if !self.session.load()?.is_authenticated() {
            return Ok(None);
        }
        match self.backend.current_user().await {
            Ok(user) => {
                if let Some(theme) = user.theme {
                    self.session.set_theme(theme)?;
                }
                Ok(Some(user))
            }
            Err(e) if e.is_auth() => {
                warn!("Session is no longer valid: {e}");
                self.session.clear()?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The logged-in user, failing with `NotAuthenticated` when there is none.
    pub async fn require_user(&self) -> ServiceResult<CurrentUser> {
        self.current_user().await?.ok_or(ServiceError::NotAuthenticated)
    }

    pub fn logout(&self) -> ServiceResult<()> {
        self.session.clear()?;
        info!("👋 Logged out");
        Ok(())
    }

    pub async fn register(&self, args: &RegisterArgs) -> ServiceResult<ApiMessage> {
        if args.username.trim().is_empty() || args.email.trim().is_empty() || args.password.is_empty() {
            return Err(ServiceError::validation("Username, email and password are required"));
        }
        Ok(self.backend.register(args).await?)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ServiceResult<ApiMessage> {
        Ok(self.backend.update_profile(update).await?)
    }

    pub async fn request_password_reset(&self) -> ServiceResult<ApiMessage> {
        Ok(self.backend.request_password_reset().await?)
    }

    pub async fn set_new_password(&self, uid: &str, token: &str, password: &str) -> ServiceResult<ApiMessage> {
        if password.is_empty() {
            return Err(ServiceError::validation("Password cannot be empty"));
        }
        Ok(self.backend.set_new_password(uid, token, password).await?)
    }

    pub async fn send_verification_email(&self) -> ServiceResult<ApiMessage> {
        Ok(self.backend.send_verification_email().await?)
    }

    /// Deactivate the account; the local session is cleared on success.
    pub async fn deactivate_account(&self) -> ServiceResult<ApiMessage> {
        let message = self.backend.deactivate_account().await?;
        self.session.clear()?;
        info!("Account deactivated, session cleared");
        Ok(message)
    }

    /// Store the theme locally, then push it to the server.
    pub async fn set_theme(&self, theme: Theme) -> ServiceResult<()> {
        self.session.set_theme(theme)?;
        if let Err(e) = self.backend.update_theme(theme).await {
            error!("❌ Failed to save theme on server: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    pub fn local_theme(&self) -> ServiceResult<Option<Theme>> {
        Ok(self.session.theme()?)
    }

    pub async fn set_push_notifications(&self, enabled: bool) -> ServiceResult<()> {
        self.backend.set_push_notifications(enabled).await?;
        Ok(())
    }
}
