//! Application service — session establishment.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};

use crate::application::ports::{AccountApi, Clock, SessionStore};
use crate::domain::session::Session;

/// Build and persist a session from a freshly obtained bearer token.
///
/// The profile fetch is best-effort: a session without a cached profile is
/// still fully usable, so a failure there only costs the offline display.
///
/// # Errors
///
/// Returns an error if the session cannot be persisted.
pub async fn establish(
    api: &impl AccountApi,
    store: &impl SessionStore,
    clock: &impl Clock,
    token: String,
) -> Result<Session> {
    let user = api.profile().await.ok();
    let session = Session::new(token, user, clock.now());
    store
        .save_async(&session)
        .await
        .context("Failed to save session")?;
    Ok(session)
}

/// Load the persisted session, or fail with a login hint.
///
/// # Errors
///
/// Returns [`crate::domain::error::SessionError::NotLoggedIn`] when no
/// session file exists.
pub async fn require(store: &impl SessionStore) -> Result<Session> {
    store
        .load_async()
        .await?
        .ok_or_else(|| crate::domain::error::SessionError::NotLoggedIn.into())
}
