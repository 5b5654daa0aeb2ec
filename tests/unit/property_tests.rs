//! Property-based tests for the countdown derivation.
//!
//! The lifecycle view is a pure function of `(record, now)`; proptest walks
//! the input space and checks the arithmetic invariants hold everywhere.

#![allow(clippy::expect_used)]

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use flagrun_cli::domain::instance::{
    BOOT_WINDOW_SECS, EXTEND_WINDOW_SECS, InstanceState, InstanceStatus, format_countdown,
    lifecycle_view,
};

fn record(age_secs: i64, status: InstanceState, extensions: u32) -> InstanceStatus {
    let now = Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).single().expect("valid ts");
    InstanceStatus {
        start_timestamp: now - Duration::seconds(age_secs),
        status,
        public_ip: None,
        extension_count: extensions,
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).single().expect("valid ts")
}

fn any_state() -> impl Strategy<Value = InstanceState> {
    prop_oneof![
        Just(InstanceState::Pending),
        Just(InstanceState::Running),
        Just(InstanceState::Terminated),
    ]
}

proptest! {
    /// Boot countdown is exactly `max(0, 60 − elapsed)` while pending.
    #[test]
    fn boot_countdown_formula(age in 0i64..7200) {
        let view = lifecycle_view(Some(&record(age, InstanceState::Pending, 0)), now());
        prop_assert_eq!(view.boot_countdown, Some((BOOT_WINDOW_SECS - age).max(0)));
    }

    /// Boot countdown is undefined for any non-pending record.
    #[test]
    fn boot_countdown_undefined_past_pending(age in 0i64..7200) {
        for status in [InstanceState::Running, InstanceState::Terminated] {
            let view = lifecycle_view(Some(&record(age, status, 0)), now());
            prop_assert_eq!(view.boot_countdown, None);
        }
    }

    /// Expiry countdown is `max(0, (1 + extensions)·3600 − elapsed)` for
    /// every status.
    #[test]
    fn expiry_countdown_formula(age in 0i64..50_000, ext in 0u32..8, status in any_state()) {
        let view = lifecycle_view(Some(&record(age, status, ext)), now());
        let expected = ((1 + i64::from(ext)) * 3600 - age).max(0);
        prop_assert_eq!(view.expiry_countdown, Some(expected));
    }

    /// Extension eligibility is exactly: running, with remaining time in
    /// `(0, 1800]`.
    #[test]
    fn can_extend_iff_running_inside_window(age in 0i64..50_000, ext in 0u32..8, status in any_state()) {
        let view = lifecycle_view(Some(&record(age, status, ext)), now());
        let remaining = view.expiry_countdown.expect("record present");
        let expected = status == InstanceState::Running
            && remaining > 0
            && remaining <= EXTEND_WINDOW_SECS;
        prop_assert_eq!(view.can_extend, expected);
    }

    /// Polling is due exactly when pending with the boot window elapsed.
    #[test]
    fn poll_due_iff_pending_past_boot_window(age in 0i64..7200, status in any_state()) {
        let view = lifecycle_view(Some(&record(age, status, 0)), now());
        let expected = status == InstanceState::Pending && age >= BOOT_WINDOW_SECS;
        prop_assert_eq!(view.poll_due, expected);
    }

    /// Same inputs, same view: derivation has no hidden state.
    #[test]
    fn derivation_is_deterministic(age in 0i64..50_000, ext in 0u32..8, status in any_state()) {
        let inst = record(age, status, ext);
        prop_assert_eq!(
            lifecycle_view(Some(&inst), now()),
            lifecycle_view(Some(&inst), now())
        );
    }

    /// `format_countdown` round-trips the total seconds it renders.
    #[test]
    fn format_countdown_preserves_total(secs in 0i64..100_000) {
        let text = format_countdown(secs);
        let mut total = 0i64;
        for part in text.split_whitespace() {
            let (value, unit) = part.split_at(part.len() - 1);
            let value: i64 = value.parse().expect("numeric component");
            total += match unit {
                "h" => value * 3600,
                "m" => value * 60,
                "s" => value,
                other => panic!("unexpected unit {other}"),
            };
        }
        prop_assert_eq!(total, secs);
    }
}
