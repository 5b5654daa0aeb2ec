//! `flagrun question` — show one question, with its machine status if any.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::{ChallengeApi, Clock, InstanceApi, SystemClock};
use crate::domain::contest::validate_resource_id;
use crate::domain::instance::{InstanceState, format_countdown, lifecycle_view};

/// Run the question command.
pub async fn run(app: &AppContext, question_id: &str) -> Result<ExitCode> {
    validate_resource_id(question_id)?;

    let api = app.authed_api()?;
    let question = api.question(question_id).await?;
    let machine = api.stored_status(question_id).await?;

    if app.is_json() {
        let now = SystemClock.now();
        let view = lifecycle_view(machine.as_ref(), now);
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "question": question,
                "machine": machine,
                "expiry_countdown": view.expiry_countdown,
                "can_extend": view.can_extend,
            }))?
        );
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header(&question.title);
    if let Some(points) = question.points {
        app.output.kv("points    ", &points.to_string());
    }
    if let Some(difficulty) = question.difficulty {
        app.output.kv("difficulty", difficulty.display());
    }
    app.output.kv(
        "status    ",
        if question.is_solved { "solved" } else { "unsolved" },
    );
    if !question.description.is_empty() {
        println!();
        println!("  {}", question.description);
    }

    println!();
    render_machine(app, machine.as_ref());
    Ok(ExitCode::SUCCESS)
}

/// One-shot machine summary under the question detail. The live view with
/// running countdowns is `flagrun machine watch`.
fn render_machine(app: &AppContext, machine: Option<&crate::domain::instance::InstanceStatus>) {
    let Some(status) = machine else {
        app.output.info("No machine provisioned. Start one with 'flagrun machine start'.");
        return;
    };

    let view = lifecycle_view(Some(status), SystemClock.now());
    match status.status {
        InstanceState::Pending => match view.boot_countdown {
            Some(secs) if secs > 0 => app.output.info(&format!(
                "Machine booting, ready in {}",
                format_countdown(secs)
            )),
            _ => app.output.info("Machine booting, waiting for address"),
        },
        InstanceState::Running => {
            let ip = status.public_ip.as_deref().unwrap_or("(no address yet)");
            app.output.success(&format!("Machine running at {ip}"));
        }
        InstanceState::Terminated => app.output.info("Machine terminated"),
    }
    if status.status != InstanceState::Terminated {
        if let Some(secs) = view.expiry_countdown {
            app.output
                .kv("expires in", &format_countdown(secs));
        }
        if view.can_extend {
            app.output
                .info("Less than 30 minutes left. 'flagrun machine extend' adds an hour.");
        }
    }
}
