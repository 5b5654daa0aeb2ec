//! `flagrun machine` — practice machine lifecycle.
//!
//! `start`, `stop`, and `extend` are single requests; `status` is a one-shot
//! snapshot; `watch` hands off to the application-layer watch loop with a
//! Ctrl-C cancellation future and a spinner reporter.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::{Clock, InstanceApi, SystemClock};
use crate::application::services::machine::{WatchOutcome, watch};
use crate::domain::contest::validate_resource_id;
use crate::domain::instance::{InstanceState, format_countdown, lifecycle_view};
use crate::output::reporter::{SpinnerReporter, TerminalReporter};

/// Machine subcommands.
#[derive(Subcommand)]
pub enum MachineCommand {
    /// Start the question's machine
    Start {
        /// Question id
        question_id: String,
    },
    /// Terminate the question's machine
    Stop {
        /// Question id
        question_id: String,
    },
    /// Add one hour to the machine's runtime
    Extend {
        /// Question id
        question_id: String,
    },
    /// Show the machine's status
    Status {
        /// Question id
        question_id: String,
    },
    /// Follow the machine with live countdowns until it is up
    Watch {
        /// Question id
        #[arg(value_name = "question_id")]
        question_id: String,
    },
}

/// Run the machine command.
pub async fn run(app: &AppContext, cmd: MachineCommand) -> Result<ExitCode> {
    match cmd {
        MachineCommand::Start { question_id } => start(app, &question_id).await,
        MachineCommand::Stop { question_id } => stop(app, &question_id).await,
        MachineCommand::Extend { question_id } => extend(app, &question_id).await,
        MachineCommand::Status { question_id } => status(app, &question_id).await,
        MachineCommand::Watch { question_id } => watch_machine(app, &question_id).await,
    }
}

async fn start(app: &AppContext, question_id: &str) -> Result<ExitCode> {
    validate_resource_id(question_id)?;
    let api = app.authed_api()?;

    let response = api
        .start(question_id)
        .await
        .context("Failed to start machine")?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(ExitCode::SUCCESS);
    }

    if response.already_running() {
        let ip = response.public_ip.as_deref().unwrap_or_default();
        app.output.success(&format!("Machine already running at {ip}"));
    } else {
        app.output
            .success("Machine starting. This may take up to a minute.");
        app.output
            .info(&format!("Follow it with 'flagrun machine watch {question_id}'"));
    }
    Ok(ExitCode::SUCCESS)
}

async fn stop(app: &AppContext, question_id: &str) -> Result<ExitCode> {
    validate_resource_id(question_id)?;
    let api = app.authed_api()?;

    api.terminate(question_id)
        .await
        .context("Failed to terminate machine")?;

    if app.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "terminated": true }))?
        );
        return Ok(ExitCode::SUCCESS);
    }
    app.output.success("Machine terminated.");
    Ok(ExitCode::SUCCESS)
}

async fn extend(app: &AppContext, question_id: &str) -> Result<ExitCode> {
    validate_resource_id(question_id)?;
    let api = app.authed_api()?;

    // Check eligibility locally first so an out-of-window request fails with
    // a useful message instead of a backend error.
    let stored = api.stored_status(question_id).await?;
    let view = lifecycle_view(stored.as_ref(), SystemClock.now());
    if !view.can_extend {
        let message = "You can extend only when 30 minutes or less are remaining.";
        if app.is_json() {
            println!("{}", crate::output::json::format_error(message, "extend_window")?);
        } else {
            app.output.warn(message);
        }
        return Ok(ExitCode::FAILURE);
    }

    let status = api
        .extend(question_id)
        .await
        .context("Failed to extend machine")?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(ExitCode::SUCCESS);
    }
    app.output.success("Extended by 1 hour.");
    if let Some(secs) = lifecycle_view(Some(&status), SystemClock.now()).expiry_countdown {
        app.output.kv("expires in", &format_countdown(secs));
    }
    Ok(ExitCode::SUCCESS)
}

async fn status(app: &AppContext, question_id: &str) -> Result<ExitCode> {
    validate_resource_id(question_id)?;
    let api = app.authed_api()?;

    let stored = api.stored_status(question_id).await?;
    let now = SystemClock.now();
    let view = lifecycle_view(stored.as_ref(), now);

    if app.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "machine": stored,
                "boot_countdown": view.boot_countdown,
                "expiry_countdown": view.expiry_countdown,
                "can_extend": view.can_extend,
            }))?
        );
        return Ok(ExitCode::SUCCESS);
    }

    let Some(machine) = stored else {
        app.output.info("No machine provisioned");
        return Ok(ExitCode::SUCCESS);
    };

    match machine.status {
        InstanceState::Pending => match view.boot_countdown {
            Some(secs) if secs > 0 => app.output.info(&format!(
                "Machine booting, ready in {}",
                format_countdown(secs)
            )),
            _ => app.output.info("Machine booting, waiting for address"),
        },
        InstanceState::Running => {
            let ip = machine.public_ip.as_deref().unwrap_or("(no address yet)");
            app.output.success(&format!("Machine running at {ip}"));
        }
        InstanceState::Terminated => app.output.info("Machine terminated"),
    }
    if machine.status != InstanceState::Terminated {
        if let Some(secs) = view.expiry_countdown {
            app.output.kv("expires in", &format_countdown(secs));
        }
        if view.can_extend {
            app.output
                .info("Less than 30 minutes left. 'flagrun machine extend' adds an hour.");
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn watch_machine(app: &AppContext, question_id: &str) -> Result<ExitCode> {
    validate_resource_id(question_id)?;
    let api = app.authed_api()?;

    let Some(initial) = api.stored_status(question_id).await? else {
        app.output.info("No machine provisioned. Start one with 'flagrun machine start'.");
        return Ok(ExitCode::FAILURE);
    };

    let cancel = async {
        // A failed signal hookup leaves the loop running until the machine
        // resolves on its own, which beats aborting the watch outright.
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let outcome = if app.output.show_progress() {
        let reporter = SpinnerReporter::new();
        let outcome = watch(&api, &SystemClock, &reporter, question_id, initial, cancel).await;
        reporter.finish();
        outcome?
    } else {
        let reporter = TerminalReporter::new(&app.output);
        watch(&api, &SystemClock, &reporter, question_id, initial, cancel).await?
    };

    match outcome {
        WatchOutcome::Terminated | WatchOutcome::Expired => Ok(ExitCode::SUCCESS),
        WatchOutcome::Cancelled => {
            app.output.info("Watch stopped. The machine keeps running.");
            Ok(ExitCode::SUCCESS)
        }
    }
}
