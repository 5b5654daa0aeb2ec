//! `flagrun login` — sign in and store a session.

use anyhow::{Context, Result};
use clap::Args;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::{AccountApi, SystemClock};
use crate::application::services::session;

/// Arguments for `flagrun login`.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted for when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Account password (prompted for when omitted; prefer the prompt over
    /// leaving secrets in shell history)
    #[arg(long)]
    pub password: Option<String>,
}

/// Run the login command.
pub async fn run(app: &AppContext, args: &LoginArgs) -> Result<ExitCode> {
    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompt_email(app)?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password(app)?,
    };

    let api = app.api()?;
    let token = api.login(&email, &password).await?;

    // Re-authenticate the client so the profile fetch carries the new token.
    let api = app.api()?.with_bearer(&token);
    let saved = session::establish(&api, &app.session_mgr, &SystemClock, token).await?;

    if app.is_json() {
        let name = saved.user.as_ref().map(crate::domain::contest::User::full_name);
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "logged_in": true,
                "email": email,
                "name": name,
            }))?
        );
        return Ok(ExitCode::SUCCESS);
    }

    match &saved.user {
        Some(user) => app
            .output
            .success(&format!("Logged in as {}", user.full_name())),
        None => app.output.success("Logged in"),
    }
    Ok(ExitCode::SUCCESS)
}

fn prompt_email(app: &AppContext) -> Result<String> {
    if app.non_interactive {
        anyhow::bail!("No terminal for prompts. Pass --email and --password.");
    }
    dialoguer::Input::new()
        .with_prompt("Email")
        .interact_text()
        .context("email prompt failed")
}

fn prompt_password(app: &AppContext) -> Result<String> {
    if app.non_interactive {
        anyhow::bail!("No terminal for prompts. Pass --email and --password.");
    }
    dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .context("password prompt failed")
}
