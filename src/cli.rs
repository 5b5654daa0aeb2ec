//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::application::ports::SessionStore;
use crate::commands;
use crate::domain::error::ApiError;

/// Terminal client for the Flagrun CTF platform
#[derive(Parser)]
#[command(
    name = "flagrun",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output. The `NO_COLOR` env var is honored directly in
    /// `OutputContext::new`; wiring it through clap as well would count as a
    /// provided argument and defeat `arg_required_else_help`.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store a session
    Login(commands::login::LoginArgs),

    /// Discard the stored session
    Logout,

    /// Show the logged-in profile
    Profile,

    /// List challenge categories
    Genres,

    /// List questions in a genre
    Questions {
        /// Genre id
        genre_id: String,
    },

    /// Show one question
    Question {
        /// Question id
        question_id: String,
    },

    /// Submit a flag for a question
    Submit {
        /// Question id
        question_id: String,
        /// The flag to submit
        flag: String,
    },

    /// Show the rankings
    Leaderboard,

    /// Manage a question's practice machine
    #[command(subcommand)]
    Machine(commands::machine::MachineCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(ExitCode::SUCCESS);
        }

        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
        })?;

        let result = match command {
            Command::Login(args) => commands::login::run(&app, &args).await,
            Command::Logout => commands::logout::run(&app),
            Command::Profile => commands::profile::run(&app).await,
            Command::Genres => commands::genres::run(&app).await,
            Command::Questions { genre_id } => commands::questions::run(&app, &genre_id).await,
            Command::Question { question_id } => commands::question::run(&app, &question_id).await,
            Command::Submit { question_id, flag } => {
                commands::submit::run(&app, &question_id, &flag).await
            }
            Command::Leaderboard => commands::leaderboard::run(&app).await,
            Command::Machine(cmd) => commands::machine::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => unreachable!("handled above"),
        };

        match result {
            Err(err) if is_unauthorized(&err) => {
                // A 401 anywhere means the token is dead. Tear the session
                // down so the next command starts from a clean login.
                app.session_mgr.clear()?;
                Err(err)
            }
            other => other,
        }
    }
}

fn is_unauthorized(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized))
}
