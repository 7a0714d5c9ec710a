//! `TerminalReporter`: presentation-layer implementation of `ProgressReporter`.
//!
//! Application services emit progress events through the port; this type
//! decides where each event lands:
//!
//! | event         | TTY, not quiet            | otherwise            | quiet      |
//! |---------------|---------------------------|----------------------|------------|
//! | `step`        | starts a spinner          | `→` line on stdout   | dropped    |
//! | `success`     | settles the spinner `✓`   | `✓` line on stdout   | dropped    |
//! | `warn`        | settles the spinner `⚠`   | `⚠` line on stdout   | dropped    |
//! | `error`       | clears spinner, stderr    | stderr               | stderr     |
//! | `output_line` | stderr, spinner suspended | stderr               | stderr     |
//! | `handover`    | clears spinner, stderr    | stderr               | stderr     |

use std::cell::RefCell;
use std::io::{self, Stderr, Stdout, Write};

use indicatif::ProgressBar;
use owo_colors::{OwoColorize as _, Style};

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter writing to stdout/stderr, or to any pair of
/// writers via [`TerminalReporter::with_writers`].
pub struct TerminalReporter<'a, O: Write = Stdout, E: Write = Stderr> {
    ctx: &'a OutputContext,
    spinner: RefCell<Option<ProgressBar>>,
    out: RefCell<O>,
    err: RefCell<E>,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self::with_writers(ctx, io::stdout(), io::stderr())
    }
}

impl<'a, O: Write, E: Write> TerminalReporter<'a, O, E> {
    #[must_use]
    pub fn with_writers(ctx: &'a OutputContext, out: O, err: E) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
            out: RefCell::new(out),
            err: RefCell::new(err),
        }
    }

    /// Whether a step spinner is currently running.
    #[must_use]
    pub fn spinner_active(&self) -> bool {
        self.spinner.borrow().is_some()
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.borrow_mut().take()
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
        }
    }

    fn marked(&self, mark: &str, style: Style, message: &str) -> String {
        format!("  {} {message}", mark.style(style))
    }

    /// Status line on stdout, or the spinner's final line if one is running.
    fn settle(&self, mark: &str, style: Style, message: &str) {
        match self.take_spinner() {
            Some(pb) => progress::settle(&pb, mark, message),
            None if self.ctx.quiet => {}
            None => {
                let line = self.marked(mark, style, message);
                let _ = writeln!(self.out.borrow_mut(), "{line}");
            }
        }
    }

    fn to_stderr(&self, line: &str) {
        let mut err = self.err.borrow_mut();
        match self.spinner.borrow().as_ref() {
            Some(pb) => pb.suspend(|| {
                let _ = writeln!(err, "{line}");
            }),
            None => {
                let _ = writeln!(err, "{line}");
            }
        }
    }
}

impl<O: Write, E: Write> ProgressReporter for TerminalReporter<'_, O, E> {
    fn step(&self, message: &str) {
        self.clear_spinner();
        if self.ctx.quiet {
            return;
        }
        if self.ctx.show_progress() {
            *self.spinner.borrow_mut() = Some(progress::spinner(message));
        } else {
            let line = self.marked("→", self.ctx.styles.step, message);
            let _ = writeln!(self.out.borrow_mut(), "{line}");
        }
    }

    fn success(&self, message: &str) {
        self.settle(progress::OK_MARK, self.ctx.styles.success, message);
    }

    fn warn(&self, message: &str) {
        self.settle(progress::WARN_MARK, self.ctx.styles.warning, message);
    }

    fn error(&self, message: &str) {
        self.clear_spinner();
        self.to_stderr(&self.marked("✗", self.ctx.styles.error, message));
    }

    fn output_line(&self, line: &str) {
        self.to_stderr(line);
    }

    fn handover(&self, message: &str) {
        self.clear_spinner();
        self.to_stderr(&self.marked(progress::WARN_MARK, self.ctx.styles.warning, message));
    }
}

impl<O: Write, E: Write> Drop for TerminalReporter<'_, O, E> {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}
