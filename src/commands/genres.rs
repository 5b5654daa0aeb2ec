//! `flagrun genres` — list challenge categories.

use anyhow::Result;
use owo_colors::OwoColorize as _;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ChallengeApi;

/// Run the genres command.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let api = app.authed_api()?;
    let genres = api.genres().await?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&genres)?);
        return Ok(ExitCode::SUCCESS);
    }

    if genres.is_empty() {
        app.output.info("No genres available");
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header("Genres");
    for genre in &genres {
        let progress = match genre.total_solved {
            Some(solved) => format!("{solved}/{}", genre.total_questions),
            None => format!("{} questions", genre.total_questions),
        };
        println!(
            "  {}  {}  {}",
            genre.title.style(app.output.styles.bold),
            progress.style(app.output.styles.dim),
            genre.id.style(app.output.styles.dim),
        );
    }
    Ok(ExitCode::SUCCESS)
}
