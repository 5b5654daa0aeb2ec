//! `flagrun submit` — submit a flag for a question.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ChallengeApi;
use crate::domain::contest::{validate_flag, validate_resource_id};

/// Run the submit command. An incorrect flag is a clean failure exit, not an
/// error.
pub async fn run(app: &AppContext, question_id: &str, flag: &str) -> Result<ExitCode> {
    validate_resource_id(question_id)?;
    validate_flag(flag)?;

    let api = app.authed_api()?;
    let correct = api.submit_flag(question_id, flag.trim()).await?;

    if app.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "is_correct": correct }))?
        );
        return Ok(if correct {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if correct {
        app.output.success("Correct flag! Challenge solved.");
        Ok(ExitCode::SUCCESS)
    } else {
        app.output.warn("Incorrect flag. Try again.");
        Ok(ExitCode::FAILURE)
    }
}
