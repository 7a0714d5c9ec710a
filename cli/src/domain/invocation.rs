//! Result of a single command execution.

/// A finished command: the literal command string, its combined output and
/// exit status. Created per execution and discarded after inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub command: String,
    pub output_lines: Vec<String>,
    pub exit_status: i32,
}

impl CommandInvocation {
    /// Build an invocation from raw combined output bytes.
    ///
    /// Output is decoded lossily and split into lines in the order produced.
    #[must_use]
    pub fn from_raw(command: &str, output: &[u8], exit_status: i32) -> Self {
        let output_lines = String::from_utf8_lossy(output)
            .lines()
            .map(str::to_owned)
            .collect();
        Self {
            command: command.to_owned(),
            output_lines,
            exit_status,
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_status == 0
    }

    /// First line of output, if any. Version probes only report this line.
    #[must_use]
    pub fn first_line(&self) -> Option<&str> {
        self.output_lines.first().map(String::as_str)
    }
}
