//! Application context — unified state passed to every command handler.
//!
//! `AppContext` replaces the per-command pattern of constructing loose
//! `OutputContext`, `HttpApi`, and store instances. Adding a new
//! cross-cutting concern (e.g. `--verbose`, telemetry) requires only one
//! field change here — zero command signatures change.

use std::io::IsTerminal as _;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::session::Session;
use crate::infra::api::HttpApi;
use crate::infra::config::YamlConfigStore;
use crate::infra::session::SessionManager;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers, replacing the previous pattern of loose parameters.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Persisted login session, loaded once at startup.
    pub session: Option<Session>,
    /// Session file manager.
    pub session_mgr: SessionManager,
    /// Config file store.
    pub config_store: YamlConfigStore,
    /// Base URL the API client was built against.
    pub base_url: String,
    /// When `true`, skip interactive prompts.
    ///
    /// Set when stdin is not a terminal or the `CI` environment variable is
    /// present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// Base URL precedence: `FLAGRUN_API_URL` env, then `api.base_url` from
    /// the config file, then the built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// the home directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_store.load()?;
        let base_url = match std::env::var("FLAGRUN_API_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => config.api.base_url,
        };

        let session_mgr = SessionManager::new()?;
        let session = session_mgr.load()?;

        let non_interactive =
            !std::io::stdin().is_terminal() || std::env::var("CI").is_ok();

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            session,
            session_mgr,
            config_store,
            base_url,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Unauthenticated API client against the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn api(&self) -> Result<HttpApi> {
        HttpApi::new(&self.base_url)
    }

    /// Authenticated API client, failing when no session is stored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::error::SessionError::NotLoggedIn`] when not
    /// logged in, or an error if the HTTP client fails to initialize.
    pub fn authed_api(&self) -> Result<HttpApi> {
        let session = self
            .session
            .as_ref()
            .ok_or(crate::domain::error::SessionError::NotLoggedIn)?;
        Ok(HttpApi::new(&self.base_url)?.with_bearer(&session.token))
    }
}
