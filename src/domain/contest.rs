//! Contest domain types and pure validation functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::ContestError;
use crate::domain::instance::InstanceState;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Logged-in participant profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub total_solved: u32,
    #[serde(default)]
    pub current_rank: u32,
}

impl User {
    /// Full display name: first, middle (if any), last.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Challenge category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub total_solved: Option<u32>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Challenge difficulty. The backend is inconsistent about casing, so both
/// `EASY` and `easy` deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[serde(alias = "easy", alias = "Easy")]
    Easy,
    #[serde(alias = "medium", alias = "Medium")]
    Medium,
    #[serde(alias = "hard", alias = "Hard")]
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn display(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// One row of a genre's question listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: String,
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(default)]
    pub is_solved: bool,
}

fn untitled() -> String {
    "Untitled".to_string()
}

/// Full challenge detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub is_solved: bool,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub last_submission_timestamp: Option<DateTime<Utc>>,
}

impl LeaderboardEntry {
    /// Full display name: first, middle (if any), last.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Rankings plus the current user's own row (which may sit outside the
/// returned page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub current_user: Option<LeaderboardEntry>,
}

/// Response to a machine start request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartResponse {
    pub status: InstanceState,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub reused: bool,
    #[serde(default)]
    pub message: String,
}

impl StartResponse {
    /// Whether the backend handed back a machine that was already up.
    #[must_use]
    pub fn already_running(&self) -> bool {
        self.status == InstanceState::Running
            && self.public_ip.as_deref().is_some_and(|ip| !ip.is_empty())
    }
}

// ── Validators ────────────────────────────────────────────────────────────────

/// Maximum accepted length for backend resource ids.
const MAX_ID_LEN: usize = 64;

/// Validates a question or genre id before it is spliced into a URL path.
///
/// Accepts non-empty ids of at most 64 characters drawn from
/// `[A-Za-z0-9_-]` — enough for UUIDs and slugs, and nothing that could
/// escape a path segment.
///
/// # Errors
///
/// Returns an error if the id is empty, too long, or contains other
/// characters.
pub fn validate_resource_id(id: &str) -> Result<(), ContestError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ContestError::InvalidQuestionId(id.to_string()))
    }
}

/// Validates a genre id with the same rules as [`validate_resource_id`].
///
/// # Errors
///
/// Returns an error naming the genre id if it fails validation.
pub fn validate_genre_id(id: &str) -> Result<(), ContestError> {
    validate_resource_id(id).map_err(|_| ContestError::InvalidGenreId(id.to_string()))
}

/// Validates a flag before submission: it must be non-empty after trimming.
///
/// The backend decides correctness; the client only refuses to send blanks.
///
/// # Errors
///
/// Returns an error if the flag is empty or whitespace-only.
pub fn validate_flag(flag: &str) -> Result<(), ContestError> {
    if flag.trim().is_empty() {
        return Err(ContestError::EmptyFlag);
    }
    Ok(())
}

// ── Unit tests ────────────────────────────────────────────────────────────────
