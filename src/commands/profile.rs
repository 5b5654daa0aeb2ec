//! `flagrun profile` — show the logged-in profile.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::AccountApi;

/// Run the profile command.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let api = app.authed_api()?;
    let user = api.profile().await?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header(&user.full_name());
    app.output.kv("email ", &user.email);
    app.output.kv("points", &user.total_points.to_string());
    app.output.kv("solved", &user.total_solved.to_string());
    app.output.kv("rank  ", &format!("#{}", user.current_rank));
    Ok(ExitCode::SUCCESS)
}
