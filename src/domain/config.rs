//! Domain types and validators for Flagrun configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["api.base_url"];

/// Backend the client talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.flagrun/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlagrunConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    if key == "api.base_url" {
        let looks_like_url = (value.starts_with("http://") || value.starts_with("https://"))
            && !value.contains(char::is_whitespace)
            && value.len() > "http://".len();
        if !looks_like_url {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                reason: "Expected an http:// or https:// URL.".to_string(),
            }
            .into());
        }
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
