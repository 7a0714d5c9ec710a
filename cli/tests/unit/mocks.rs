//! Shared mock infrastructure for unit tests.
//!
//! Provides a scripted [`CommandRunner`], a recording [`ProgressReporter`]
//! and an in-memory [`FileWriter`] so each test file doesn't have to
//! re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;
use devstack_cli::application::ports::{CommandRunner, FileWriter, ProgressReporter};

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

pub fn output(code: i32, text: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: text.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

// ── Mock: scripted command runner ─────────────────────────────────────────────

/// Unscripted commands exit 0 with no output. Queued replies for one command
/// are consumed in order and the last one sticks.
#[derive(Default)]
pub struct Scripted {
    replies: RefCell<HashMap<String, VecDeque<(i32, String)>>>,
    log: RefCell<Vec<String>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, command: &str, code: i32, text: &str) -> Self {
        self.replies
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back((code, text.to_string()));
        self
    }

    /// Every command run, interactive ones prefixed with `tty: `.
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn ran(&self, command: &str) -> bool {
        self.log.borrow().iter().any(|c| c == command)
    }

    fn reply(&self, command: &str) -> (i32, String) {
        let mut replies = self.replies.borrow_mut();
        match replies.get_mut(command) {
            Some(q) if q.len() > 1 => q.pop_front().expect("non-empty queue"),
            Some(q) => q.front().cloned().expect("non-empty queue"),
            None => (0, String::new()),
        }
    }
}

impl CommandRunner for Scripted {
    async fn run_shell(&self, command: &str) -> Result<Output> {
        self.log.borrow_mut().push(command.to_string());
        let (code, text) = self.reply(command);
        Ok(output(code, &text))
    }

    async fn run_interactive(&self, command: &str) -> Result<ExitStatus> {
        self.log.borrow_mut().push(format!("tty: {command}"));
        let (code, _) = self.reply(command);
        Ok(exit_status(code))
    }
}

// ── Mock: recording reporter ──────────────────────────────────────────────────

#[derive(Default)]
pub struct Recorder {
    pub lines: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Lines echoed from failed commands, without the `echo:` prefix.
    pub fn echoed(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|l| l.strip_prefix("echo: ").map(str::to_owned))
            .collect()
    }

    fn push(&self, kind: &str, message: &str) {
        self.lines.borrow_mut().push(format!("{kind}: {message}"));
    }
}

impl ProgressReporter for Recorder {
    fn step(&self, message: &str) {
        self.push("step", message);
    }
    fn success(&self, message: &str) {
        self.push("ok", message);
    }
    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
    fn error(&self, message: &str) {
        self.push("error", message);
    }
    fn output_line(&self, line: &str) {
        self.push("echo", line);
    }
    fn handover(&self, message: &str) {
        self.push("tty", message);
    }
}

// ── Mock: in-memory files ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct Files {
    pub written: RefCell<Vec<(PathBuf, String)>>,
}

impl FileWriter for Files {
    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.written
            .borrow_mut()
            .push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }
}
