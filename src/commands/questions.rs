//! `flagrun questions` — list questions in a genre.

use anyhow::Result;
use owo_colors::OwoColorize as _;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ChallengeApi;
use crate::domain::contest::validate_genre_id;

/// Run the questions command.
pub async fn run(app: &AppContext, genre_id: &str) -> Result<ExitCode> {
    validate_genre_id(genre_id)?;

    let api = app.authed_api()?;
    let questions = api.genre_questions(genre_id).await?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(ExitCode::SUCCESS);
    }

    if questions.is_empty() {
        app.output.info("No questions in this genre");
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header("Questions");
    for question in &questions {
        let marker = if question.is_solved {
            "✓".style(app.output.styles.solved).to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {marker} {}  {}",
            question.title,
            question.id.style(app.output.styles.dim),
        );
    }
    Ok(ExitCode::SUCCESS)
}
