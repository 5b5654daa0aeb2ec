//! Login session persisted to `~/.flagrun/session.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::contest::User;

/// Persisted bearer session.
///
/// The cached profile is a convenience for offline display; the token is the
/// only field the backend cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to every API request.
    pub token: String,
    /// Profile snapshot fetched right after login, if the fetch succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// When this session was established.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Build a fresh session from a token obtained at `now`.
    #[must_use]
    pub fn new(token: String, user: Option<User>, now: DateTime<Utc>) -> Self {
        Self {
            token,
            user,
            created_at: now,
        }
    }
}
