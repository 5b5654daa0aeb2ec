//! Practice machine lifecycle types and pure countdown derivation.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out: a status record plus a
//! sampled clock yield the boot countdown, expiry countdown, extend
//! eligibility, and the poll decision. The same `(record, now)` pair always
//! derives the same view.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Assumed time a machine needs before it can possibly be reachable.
pub const BOOT_WINDOW_SECS: i64 = 60;

/// Initial runtime grant, in hours.
pub const BASE_GRANT_HOURS: i64 = 1;

/// Extensions are only offered when this little of the grant remains.
pub const EXTEND_WINDOW_SECS: i64 = 30 * 60;

/// Display clock tick.
pub const DISPLAY_TICK: std::time::Duration = std::time::Duration::from_secs(1);

/// Background status poll interval, active only once the boot window elapsed.
pub const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);

// ── Types ─────────────────────────────────────────────────────────────────────

/// Machine lifecycle marker as reported by the backend.
///
/// Transitions only move forward: `Pending → Running → Terminated`, or
/// straight to `Terminated`. A new start request after termination yields a
/// fresh record, never a resurrection of the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceState {
    Pending,
    Running,
    Terminated,
}

/// Immutable status snapshot received from the backend.
///
/// Replaced wholesale on every fetch — never patched field-by-field.
/// `public_ip` is absent while `Pending` and stable once assigned;
/// `extension_count` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStatus {
    /// When the machine was requested to start.
    pub start_timestamp: DateTime<Utc>,
    /// Lifecycle marker.
    pub status: InstanceState,
    /// Network address, present once the machine is reachable.
    #[serde(default)]
    pub public_ip: Option<String>,
    /// Number of one-hour extensions granted so far.
    #[serde(default)]
    pub extension_count: u32,
}

impl InstanceStatus {
    /// Whether the machine is up and has an address to connect to.
    ///
    /// This is the terminal condition for the status poll loop.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.status == InstanceState::Running
            && self.public_ip.as_deref().is_some_and(|ip| !ip.is_empty())
    }

    /// Total granted lifetime in hours: one base hour plus one per extension.
    #[must_use]
    pub fn granted_hours(&self) -> i64 {
        BASE_GRANT_HOURS + i64::from(self.extension_count)
    }

    /// The instant the grant runs out.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.start_timestamp + Duration::hours(self.granted_hours())
    }
}

/// Everything the machine view needs, derived from one record and one clock
/// sample. Pure function of its inputs — see [`lifecycle_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleView {
    /// Seconds until the boot window elapses. Only meaningful while `Pending`.
    pub boot_countdown: Option<i64>,
    /// Seconds until the grant expires, floored at 0. Present whenever a
    /// record exists, regardless of status.
    pub expiry_countdown: Option<i64>,
    /// Whether a one-hour extension may be requested right now.
    pub can_extend: bool,
    /// Whether the backend should be polled for fresher status.
    pub poll_due: bool,
}

impl LifecycleView {
    /// The view for "no machine provisioned": nothing to count down, nothing
    /// to extend, nothing to poll.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            boot_countdown: None,
            expiry_countdown: None,
            can_extend: false,
            poll_due: false,
        }
    }
}

// ── Pure derivation ───────────────────────────────────────────────────────────

/// Remaining seconds of the fixed 60-second boot window, floored at 0.
///
/// Undefined (`None`) when no record exists or the machine is past `Pending`.
#[must_use]
pub fn boot_countdown(instance: Option<&InstanceStatus>, now: DateTime<Utc>) -> Option<i64> {
    let inst = instance?;
    if inst.status != InstanceState::Pending {
        return None;
    }
    let elapsed = (now - inst.start_timestamp).num_seconds();
    Some((BOOT_WINDOW_SECS - elapsed).max(0))
}

/// Remaining seconds of the runtime grant, floored at 0 for display.
///
/// Undefined (`None`) only when no record exists.
#[must_use]
pub fn expiry_countdown(instance: Option<&InstanceStatus>, now: DateTime<Utc>) -> Option<i64> {
    let inst = instance?;
    let remaining = (inst.expires_at() - now).num_seconds();
    Some(remaining.max(0))
}

/// Extensions are only offered late in the current grant: the machine must be
/// running with strictly positive time left, and at most 30 minutes of it.
#[must_use]
pub fn can_extend(instance: Option<&InstanceStatus>, now: DateTime<Utc>) -> bool {
    let Some(inst) = instance else { return false };
    if inst.status != InstanceState::Running {
        return false;
    }
    expiry_countdown(instance, now)
        .is_some_and(|remaining| remaining > 0 && remaining <= EXTEND_WINDOW_SECS)
}

/// Polling starts only once the boot window has fully elapsed while the
/// machine is still `Pending` — before that the machine cannot possibly be
/// ready and a request would be wasted.
#[must_use]
pub fn poll_due(instance: Option<&InstanceStatus>, now: DateTime<Utc>) -> bool {
    instance.is_some_and(|inst| inst.status == InstanceState::Pending)
        && boot_countdown(instance, now) == Some(0)
}

/// Derive the full lifecycle view from one record and one clock sample.
#[must_use]
pub fn lifecycle_view(instance: Option<&InstanceStatus>, now: DateTime<Utc>) -> LifecycleView {
    LifecycleView {
        boot_countdown: boot_countdown(instance, now),
        expiry_countdown: expiry_countdown(instance, now),
        can_extend: can_extend(instance, now),
        poll_due: poll_due(instance, now),
    }
}

/// Format a countdown as `1h 2m 3s` (hours omitted when zero).
#[must_use]
pub fn format_countdown(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
