//! Shared test helpers for application service tests.
//!
//! Provides cross-platform `exit_status()`, a scripted `CommandRunner`
//! that records every command, and a `ProgressReporter` that records every
//! event.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::application::ports::{CommandRunner, FileWriter, ProgressReporter};

/// Build an `ExitStatus` from a logical exit code (cross-platform).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

#[derive(Clone)]
enum Reply {
    Exit { code: i32, output: Vec<u8> },
    SpawnError,
}

/// `CommandRunner` that answers from a script keyed by exact command.
///
/// Unscripted commands succeed with no output. When several replies are
/// queued for one command they are consumed in order; the last one sticks.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    calls: RefCell<Vec<String>>,
    interactive_calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `command`.
    pub fn reply(self, command: &str, code: i32, output: &str) -> Self {
        self.push(command, Reply::Exit { code, output: output.as_bytes().to_vec() })
    }

    /// Make `command` fail to spawn.
    pub fn spawn_error(self, command: &str) -> Self {
        self.push(command, Reply::SpawnError)
    }

    fn push(self, command: &str, reply: Reply) -> Self {
        self.replies
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    fn next_reply(&self, command: &str) -> Reply {
        let mut replies = self.replies.borrow_mut();
        match replies.get_mut(command) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(Reply::SpawnError),
            Some(queue) => queue.front().cloned().unwrap_or(Reply::SpawnError),
            None => Reply::Exit { code: 0, output: Vec::new() },
        }
    }

    /// Every non-interactive command run, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Every interactive command run, in order.
    pub fn interactive_calls(&self) -> Vec<String> {
        self.interactive_calls.borrow().clone()
    }

    /// Number of times `command` was run.
    pub fn count(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == command).count()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run_shell(&self, command: &str) -> Result<Output> {
        self.calls.borrow_mut().push(command.to_string());
        match self.next_reply(command) {
            Reply::Exit { code, output } => Ok(Output {
                status: exit_status(code),
                stdout: output,
                stderr: Vec::new(),
            }),
            Reply::SpawnError => anyhow::bail!("failed to spawn sh"),
        }
    }

    async fn run_interactive(&self, command: &str) -> Result<ExitStatus> {
        self.interactive_calls.borrow_mut().push(command.to_string());
        match self.next_reply(command) {
            Reply::Exit { code, .. } => Ok(exit_status(code)),
            Reply::SpawnError => anyhow::bail!("failed to spawn sh"),
        }
    }
}

/// One reported event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Step(String),
    Success(String),
    Warn(String),
    Error(String),
    Output(String),
    Handover(String),
}

/// `ProgressReporter` that records events instead of printing them.
#[derive(Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Echoed output lines only, in order.
    pub fn echoed(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Output(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(Event::Step(message.to_string()));
    }
    fn success(&self, message: &str) {
        self.events.borrow_mut().push(Event::Success(message.to_string()));
    }
    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(Event::Warn(message.to_string()));
    }
    fn error(&self, message: &str) {
        self.events.borrow_mut().push(Event::Error(message.to_string()));
    }
    fn output_line(&self, line: &str) {
        self.events.borrow_mut().push(Event::Output(line.to_string()));
    }
    fn handover(&self, message: &str) {
        self.events.borrow_mut().push(Event::Handover(message.to_string()));
    }
}

/// `FileWriter` that keeps writes in memory.
#[derive(Default)]
pub struct MemoryFiles {
    files: RefCell<Vec<(PathBuf, String)>>,
    fail: bool,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn written(&self) -> Vec<(PathBuf, String)> {
        self.files.borrow().clone()
    }
}

impl FileWriter for MemoryFiles {
    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("cannot write {}: permission denied", path.display());
        }
        self.files
            .borrow_mut()
            .push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }
}
