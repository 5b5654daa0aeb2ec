//! Command handlers — the presentation layer.
//!
//! Each module implements one `flagrun` subcommand: parse-level argument
//! structs, port wiring, and terminal rendering. Business rules live in
//! `crate::domain` and `crate::application`; handlers only orchestrate.

pub mod config;
pub mod genres;
pub mod leaderboard;
pub mod login;
pub mod logout;
pub mod machine;
pub mod profile;
pub mod question;
pub mod questions;
pub mod submit;
pub mod version;
