//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod contest;
pub mod error;
pub mod instance;
pub mod session;

#[allow(unused_imports)]
pub use config::{FlagrunConfig, validate_config_key, validate_config_value};
#[allow(unused_imports)]
pub use contest::{
    Difficulty, Genre, Leaderboard, LeaderboardEntry, Question, QuestionSummary, StartResponse,
    User, validate_flag, validate_genre_id, validate_resource_id,
};
#[allow(unused_imports)]
pub use error::{ApiError, ConfigError, ContestError, SessionError};
#[allow(unused_imports)]
pub use instance::{InstanceState, InstanceStatus, LifecycleView, lifecycle_view};
#[allow(unused_imports)]
pub use session::Session;
