//! Backend factory for creating the backend instance from configuration.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use super::{rest::RestBackend, Backend};
use crate::config::ApiConfig;
use crate::session::SessionStore;

/// Create the backend described by the `[api]` section.
///
/// # Arguments
/// * `api` - Base URL and timeout of the remote service
/// * `session` - Token storage shared with the auth service
///
/// # Errors
/// Returns error if the HTTP client cannot be built
pub fn create_backend(api: &ApiConfig, session: Arc<dyn SessionStore>) -> Result<Arc<dyn Backend>> {
    let backend = RestBackend::new(&api.base_url, Duration::from_secs(api.timeout_secs), session)
        .with_context(|| format!("Failed to create backend for {}", api.base_url))?;
    Ok(Arc::new(backend))
}
