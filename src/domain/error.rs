//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors related to the persisted login session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in. Run 'flagrun login' first.")]
    NotLoggedIn,

    #[error("Session expired. Run 'flagrun login' to sign in again.")]
    Expired,

    #[error("Corrupt session file: {0}")]
    Corrupt(String),
}

// ── Contest errors ────────────────────────────────────────────────────────────

/// Errors related to challenge and flag input validation.
#[derive(Debug, Error)]
pub enum ContestError {
    #[error("Invalid question id: {0}")]
    InvalidQuestionId(String),

    #[error("Invalid genre id: {0}")]
    InvalidGenreId(String),

    #[error("Flag cannot be empty.")]
    EmptyFlag,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

// ── API errors ────────────────────────────────────────────────────────────────

/// Errors produced by the backend API ports.
///
/// Kept free of any HTTP client types so the domain and application layers
/// stay testable without a network stack. `is_transient` drives the poll
/// loop's retry decision: transient failures are swallowed and the next
/// scheduled attempt proceeds, non-transient ones terminate the watch.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session expired. Run 'flagrun login' to sign in again.")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Not found")]
    NotFound,

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether a background poll should silently retry after this error.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Server { .. } | Self::NotFound | Self::Decode(_)
        )
    }
}
