//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::config::FlagrunConfig;
use crate::domain::contest::{Genre, Leaderboard, Question, QuestionSummary, StartResponse, User};
use crate::domain::error::ApiError;
use crate::domain::instance::InstanceStatus;
use crate::domain::session::Session;

// ── Backend API ports ─────────────────────────────────────────────────────────

/// Authentication and profile endpoints.
#[allow(async_fn_in_trait)]
pub trait AccountApi {
    /// Exchange credentials for a bearer token (`POST /auth/login`).
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;
    /// Fetch the logged-in user's profile (`GET /user/profile`).
    async fn profile(&self) -> Result<User, ApiError>;
}

/// Genre, question, flag, and leaderboard endpoints.
#[allow(async_fn_in_trait)]
pub trait ChallengeApi {
    /// List challenge categories (`GET /genre`).
    async fn genres(&self) -> Result<Vec<Genre>, ApiError>;
    /// List questions in a genre (`GET /genre/{id}/questions`).
    async fn genre_questions(&self, genre_id: &str) -> Result<Vec<QuestionSummary>, ApiError>;
    /// Fetch one question (`GET /question/{id}`).
    async fn question(&self, question_id: &str) -> Result<Question, ApiError>;
    /// Submit a flag; returns whether it was correct
    /// (`POST /question/{id}/flag`).
    async fn submit_flag(&self, question_id: &str, flag: &str) -> Result<bool, ApiError>;
    /// Fetch the rankings (`GET /leaderboard/1`).
    async fn leaderboard(&self) -> Result<Leaderboard, ApiError>;
}

/// Practice machine lifecycle endpoints.
#[allow(async_fn_in_trait)]
pub trait InstanceApi {
    /// Last known status (`GET /ec2/status-from-db/{id}`). A backend 404
    /// means "no machine provisioned" and maps to `Ok(None)`.
    async fn stored_status(&self, question_id: &str) -> Result<Option<InstanceStatus>, ApiError>;
    /// Live status, used only while polling (`GET /ec2/status/{id}`).
    async fn live_status(&self, question_id: &str) -> Result<InstanceStatus, ApiError>;
    /// Request a machine start (`PATCH /ec2/start/{id}`).
    async fn start(&self, question_id: &str) -> Result<StartResponse, ApiError>;
    /// Terminate the machine (`PATCH /ec2/terminate/{id}`).
    async fn terminate(&self, question_id: &str) -> Result<(), ApiError>;
    /// Extend the grant by one hour (`PATCH /ec2/extend/{id}`).
    async fn extend(&self, question_id: &str) -> Result<InstanceStatus, ApiError>;
}

/// Composite trait — any type implementing all three API sub-traits is a
/// `CtfApi`.
pub trait CtfApi: AccountApi + ChallengeApi + InstanceApi {}

/// Blanket implementation for the composite API trait.
impl<T> CtfApi for T where T: AccountApi + ChallengeApi + InstanceApi {}

// ── Session and config ports ──────────────────────────────────────────────────

/// Abstracts login session persistence so commands never reach for ambient
/// global state.
#[allow(async_fn_in_trait)]
pub trait SessionStore {
    /// Load the current session, returning `None` when not logged in.
    async fn load_async(&self) -> Result<Option<Session>>;
    /// Persist the given session.
    async fn save_async(&self, session: &Session) -> Result<()>;
    /// Discard the persisted session, if any.
    fn clear(&self) -> Result<()>;
}

/// Abstracts configuration persistence (load/save/path).
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<FlagrunConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &FlagrunConfig) -> Result<()>;
    /// Location of the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

// ── Clock port ────────────────────────────────────────────────────────────────

/// Abstracts wall-clock sampling so countdown derivation and the watch loop
/// can be tested without real time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ── Progress reporting port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
