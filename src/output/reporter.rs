//! Presentation-layer implementations of `ProgressReporter`.
//!
//! Application services emit progress events through the
//! `application::ports::ProgressReporter` trait; these types decide how the
//! events land on the terminal.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ⚠ {message}"` (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".cyan());
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".green());
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".yellow());
        }
    }
}

/// Reporter that drives a single spinner line, for the live machine view.
///
/// `step()` rewrites the spinner message in place so the countdown updates
/// on one line instead of scrolling; `success()` and `warn()` finish the
/// current spinner and start a fresh one for any steps that follow.
pub struct SpinnerReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl SpinnerReporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    /// Finish whatever spinner is active, leaving the last message visible.
    pub fn finish(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            progress::finish_ok(&bar, &bar.message());
        }
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        let mut slot = self.bar.borrow_mut();
        match slot.as_ref() {
            Some(bar) => bar.set_message(message.to_string()),
            None => *slot = Some(progress::spinner(message)),
        }
    }

    fn success(&self, message: &str) {
        let mut slot = self.bar.borrow_mut();
        match slot.take() {
            Some(bar) => progress::finish_ok(&bar, message),
            None => println!("  {} {message}", "✓".green()),
        }
    }

    fn warn(&self, message: &str) {
        let mut slot = self.bar.borrow_mut();
        match slot.take() {
            Some(bar) => progress::finish_warn(&bar, message),
            None => println!("  {} {message}", "!".yellow()),
        }
    }
}
