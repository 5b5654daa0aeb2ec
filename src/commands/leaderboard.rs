//! `flagrun leaderboard` — show the rankings.

use anyhow::Result;
use owo_colors::OwoColorize as _;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ChallengeApi;
use crate::domain::contest::LeaderboardEntry;

/// Run the leaderboard command.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let api = app.authed_api()?;
    let board = api.leaderboard().await?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(ExitCode::SUCCESS);
    }

    if board.leaderboard.is_empty() {
        app.output.info("Leaderboard is empty");
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header("Leaderboard");
    let own_rank = board.current_user.as_ref().map(|e| e.rank);
    for entry in &board.leaderboard {
        render_row(app, entry, own_rank == Some(entry.rank));
    }

    // The user's own row may fall outside the returned page.
    if let Some(own) = &board.current_user {
        if board.leaderboard.iter().all(|e| e.rank != own.rank) {
            println!("  {}", "···".style(app.output.styles.dim));
            render_row(app, own, true);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn render_row(app: &AppContext, entry: &LeaderboardEntry, is_self: bool) {
    let line = format!(
        "{rank:>4}  {points:>6}  {name}{marker}",
        rank = entry.rank,
        points = entry.points,
        name = entry.full_name(),
        marker = if is_self { "  (you)" } else { "" },
    );
    if is_self {
        println!("  {}", line.style(app.output.styles.bold));
    } else {
        println!("  {line}");
    }
}
