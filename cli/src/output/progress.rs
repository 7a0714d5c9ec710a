//! The per-step spinner shown on a TTY.

#![allow(clippy::expect_used)] // Templates are compile-time constants

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Braille frames; the last entry is shown once the spinner finishes.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// Marker left on the line of a step that settled successfully.
pub const OK_MARK: &str = "✓";

/// Marker left on the line of a step that settled with a warning.
pub const WARN_MARK: &str = "⚠";

/// Start a spinner showing `msg`.
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner().with_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(FRAMES),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Stop `pb` and leave `mark msg` on its line.
pub fn settle(pb: &ProgressBar, mark: &str, msg: &str) {
    pb.set_style(ProgressStyle::with_template("  {prefix} {msg}").expect("valid template"));
    pb.set_prefix(mark.to_string());
    pb.finish_with_message(msg.to_string());
}
