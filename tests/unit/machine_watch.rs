//! Watch-loop tests under a paused tokio runtime.
//!
//! Virtual time lets each test drive minutes of countdown in microseconds:
//! the loop's 1-second display tick and 5-second poll interval fire against
//! `tokio::time`, and [`mocks::TestClock`] keeps the wall clock in step.

#![allow(clippy::expect_used)]

use chrono::{Duration, TimeZone, Utc};

use flagrun_cli::application::services::machine::{WatchOutcome, watch};
use flagrun_cli::domain::error::ApiError;
use flagrun_cli::domain::instance::{InstanceState, InstanceStatus};

use crate::mocks::{
    RecordingReporter, ScriptedInstanceApi, TestClock, pending_status, running_status,
};

fn base() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 31, 10, 0, 0).single().expect("valid ts")
}

async fn cancel_after(secs: u64) {
    tokio::time::sleep(std::time::Duration::from_secs(secs)).await;
}

#[tokio::test(start_paused = true)]
async fn test_no_polling_before_boot_window_elapses() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![]);
    let reporter = RecordingReporter::new();

    let outcome = watch(
        &api,
        &clock,
        &reporter,
        "q-1",
        pending_status(base()),
        cancel_after(45),
    )
    .await
    .expect("watch runs");

    assert_eq!(outcome, WatchOutcome::Cancelled);
    assert_eq!(api.poll_count(), 0, "machine cannot be ready inside the boot window");
    assert!(reporter.joined().contains("Booting"));
}

#[tokio::test(start_paused = true)]
async fn test_polling_starts_after_boot_window_and_stops_when_reachable() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![
        Ok(pending_status(base())),
        Ok(running_status(base(), "203.0.113.9")),
    ]);
    let reporter = RecordingReporter::new();

    let outcome = watch(
        &api,
        &clock,
        &reporter,
        "q-1",
        pending_status(base()),
        cancel_after(120),
    )
    .await
    .expect("watch runs");

    assert_eq!(outcome, WatchOutcome::Cancelled);
    assert_eq!(api.poll_count(), 2, "polling must stop once the machine is reachable");
    assert!(reporter.joined().contains("203.0.113.9"));
}

#[tokio::test(start_paused = true)]
async fn test_pending_record_without_ip_is_not_adopted() {
    let clock = TestClock::new(base());
    // Running but with no address yet: still not reachable, keep polling.
    let no_ip = InstanceStatus {
        start_timestamp: base(),
        status: InstanceState::Running,
        public_ip: None,
        extension_count: 0,
    };
    let api = ScriptedInstanceApi::new(vec![
        Ok(no_ip),
        Ok(running_status(base(), "198.51.100.7")),
    ]);
    let reporter = RecordingReporter::new();

    watch(
        &api,
        &clock,
        &reporter,
        "q-1",
        pending_status(base()),
        cancel_after(120),
    )
    .await
    .expect("watch runs");

    assert_eq!(api.poll_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_transient_poll_errors_are_swallowed() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![
        Err(ApiError::Transport("connection refused".into())),
        Err(ApiError::Server {
            status: 502,
            message: "bad gateway".into(),
        }),
        Ok(running_status(base(), "203.0.113.9")),
    ]);
    let reporter = RecordingReporter::new();

    let outcome = watch(
        &api,
        &clock,
        &reporter,
        "q-1",
        pending_status(base()),
        cancel_after(120),
    )
    .await
    .expect("transient errors must not kill the watch");

    assert_eq!(outcome, WatchOutcome::Cancelled);
    assert_eq!(api.poll_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_unauthorized_poll_ends_the_watch() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![Err(ApiError::Unauthorized)]);
    let reporter = RecordingReporter::new();

    let result = watch(
        &api,
        &clock,
        &reporter,
        "q-1",
        pending_status(base()),
        cancel_after(300),
    )
    .await;

    let err = result.expect_err("dead token should surface");
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Unauthorized)
    ));
    assert_eq!(api.poll_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_already_reachable_machine_is_never_polled() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![]);
    let reporter = RecordingReporter::new();

    let outcome = watch(
        &api,
        &clock,
        &reporter,
        "q-1",
        running_status(base(), "203.0.113.9"),
        cancel_after(30),
    )
    .await
    .expect("watch runs");

    assert_eq!(outcome, WatchOutcome::Cancelled);
    assert_eq!(api.poll_count(), 0);
    assert!(reporter.joined().contains("203.0.113.9"));
}

#[tokio::test(start_paused = true)]
async fn test_terminated_record_ends_immediately() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![]);
    let reporter = RecordingReporter::new();

    let terminated = InstanceStatus {
        start_timestamp: base(),
        status: InstanceState::Terminated,
        public_ip: None,
        extension_count: 0,
    };
    let outcome = watch(&api, &clock, &reporter, "q-1", terminated, cancel_after(300))
        .await
        .expect("watch runs");

    assert_eq!(outcome, WatchOutcome::Terminated);
    assert_eq!(api.poll_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_expired_grant_ends_the_watch() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![]);
    let reporter = RecordingReporter::new();

    // Started two hours ago with a one-hour grant: already expired.
    let stale = running_status(base() - Duration::hours(2), "203.0.113.9");
    let outcome = watch(&api, &clock, &reporter, "q-1", stale, cancel_after(300))
        .await
        .expect("watch runs");

    assert_eq!(outcome, WatchOutcome::Expired);
    assert!(reporter.joined().contains("expired"));
}

#[tokio::test(start_paused = true)]
async fn test_watch_expires_while_running() {
    let clock = TestClock::new(base());
    let api = ScriptedInstanceApi::new(vec![]);
    let reporter = RecordingReporter::new();

    // 30 seconds of grant left; the display tick should walk it down to
    // expiry rather than wait for the cancel at 300s.
    let almost_done = running_status(base() - Duration::seconds(3570), "203.0.113.9");
    let outcome = watch(&api, &clock, &reporter, "q-1", almost_done, cancel_after(300))
        .await
        .expect("watch runs");

    assert_eq!(outcome, WatchOutcome::Expired);
}
