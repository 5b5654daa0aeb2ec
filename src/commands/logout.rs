//! `flagrun logout` — discard the stored session.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::SessionStore;

/// Run the logout command. Idempotent: logging out twice is not an error.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let had_session = app.session.is_some();
    app.session_mgr.clear()?;

    if app.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "logged_out": had_session }))?
        );
        return Ok(ExitCode::SUCCESS);
    }

    if had_session {
        app.output.success("Logged out");
    } else {
        app.output.info("Not logged in");
    }
    Ok(ExitCode::SUCCESS)
}
