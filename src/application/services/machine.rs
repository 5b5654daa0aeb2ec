//! Application service — practice machine watch loop.
//!
//! Drives the live countdown view for one machine: a 1-second display tick,
//! a 5-second status poll that only runs once the boot window has elapsed,
//! and a caller-supplied cancellation future. Imports only from
//! `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use tokio::time::MissedTickBehavior;

use crate::application::ports::{Clock, InstanceApi, ProgressReporter};
use crate::domain::instance::{
    DISPLAY_TICK, InstanceStatus, POLL_INTERVAL, format_countdown, lifecycle_view, poll_due,
};

/// How the watch loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The backend reported the machine terminated.
    Terminated,
    /// The runtime grant ran out.
    Expired,
    /// The caller's cancellation future resolved.
    Cancelled,
}

/// Watch one machine until it terminates, its grant expires, or the caller
/// cancels.
///
/// The loop re-derives the lifecycle view from the latest status record and
/// a fresh clock sample on every tick; it never mutates countdowns in place.
/// Polling adopts a fresh record only when it is reachable (running with an
/// address) and then stops for good. Transient poll errors are swallowed and
/// the next scheduled attempt proceeds.
///
/// # Errors
///
/// Returns an error when a poll fails with a non-transient error, such as an
/// expired session.
pub async fn watch(
    api: &impl InstanceApi,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    question_id: &str,
    initial: InstanceStatus,
    cancel: impl Future<Output = ()>,
) -> Result<WatchOutcome> {
    let mut status = initial;
    let mut polling_done = status.is_reachable();

    let mut display = tokio::time::interval(DISPLAY_TICK);
    display.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut poll = tokio::time::interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(cancel);

    loop {
        let now = clock.now();
        let view = lifecycle_view(Some(&status), now);

        if status.status == crate::domain::instance::InstanceState::Terminated {
            reporter.warn("Machine terminated.");
            return Ok(WatchOutcome::Terminated);
        }
        if view.expiry_countdown == Some(0) {
            reporter.warn("Machine time expired.");
            return Ok(WatchOutcome::Expired);
        }

        reporter.step(&render_line(&status, view.boot_countdown, view.expiry_countdown));

        tokio::select! {
            () = &mut cancel => return Ok(WatchOutcome::Cancelled),
            _ = display.tick() => {}
            _ = poll.tick(), if !polling_done && poll_due(Some(&status), now) => {
                match api.live_status(question_id).await {
                    Ok(fresh) if fresh.is_reachable() => {
                        reporter.success(&format!(
                            "Machine is up at {}",
                            fresh.public_ip.as_deref().unwrap_or_default()
                        ));
                        status = fresh;
                        polling_done = true;
                    }
                    Ok(_) => {}
                    Err(err) if err.is_transient() => {}
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }
}

/// One line of the live view: state, address, and the active countdowns.
fn render_line(status: &InstanceStatus, boot: Option<i64>, expiry: Option<i64>) -> String {
    let mut parts = Vec::with_capacity(3);
    match boot {
        Some(secs) if secs > 0 => {
            parts.push(format!("Booting, ready in {}", format_countdown(secs)));
        }
        Some(_) => parts.push("Waiting for machine address".to_string()),
        None => {
            if let Some(ip) = status.public_ip.as_deref().filter(|ip| !ip.is_empty()) {
                parts.push(format!("Running at {ip}"));
            }
        }
    }
    if let Some(secs) = expiry {
        parts.push(format!("expires in {}", format_countdown(secs)));
    }
    parts.join(", ")
}
