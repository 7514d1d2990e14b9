//! Local storage for the access/refresh token pair.
//!
//! The session is a tiny key-value record: tokens, the "remember me" flag
//! chosen at login, and the last theme received from the server.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::models::Theme;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted session file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Everything persisted between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub remember_me: bool,
    pub theme: Option<Theme>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Token storage used by the REST backend and the auth service.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Session, SessionError>;

    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget tokens, theme and the remember-me flag.
    fn clear(&self) -> Result<(), SessionError> {
        self.save(&Session::default())
    }

    fn access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.access_token)
    }

    fn refresh_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.refresh_token)
    }

    fn set_access_token(&self, token: &str) -> Result<(), SessionError> {
        let mut session = self.load()?;
        session.access_token = Some(token.to_string());
        self.save(&session)
    }

    fn theme(&self) -> Result<Option<Theme>, SessionError> {
        Ok(self.load()?.theme)
    }

    fn set_theme(&self, theme: Theme) -> Result<(), SessionError> {
        let mut session = self.load()?;
        session.theme = Some(theme);
        self.save(&session)
    }
}

/// Session kept in a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, SessionError> {
        let _guard = self.guard();
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Session::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let _guard = self.guard();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.guard();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session kept in memory, for tests and one-shot tooling.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session, SessionError> {
        Ok(self.inner.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(|p| p.into_inner()) = session.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_updates_access_token_only() {
        let store = MemorySessionStore::with_session(Session {
            access_token: Some("old".into()),
            refresh_token: Some("refresh".into()),
            remember_me: true,
            theme: None,
        });
        store.set_access_token("new").unwrap();
        let session = store.load().unwrap();
        assert_eq!(session.access_token.as_deref(), Some("new"));
        assert_eq!(session.refresh_token.as_deref(), Some("refresh"));
        assert!(session.remember_me);
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let session = Session {
            access_token: Some(String::new()),
            ..Default::default()
        };
        assert!(!session.is_authenticated());
        assert!(!Session::default().is_authenticated());
    }
}
