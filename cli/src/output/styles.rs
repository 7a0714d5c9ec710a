//! Stylesheet for terminal output. The default is plain text.

use owo_colors::Style;

/// One style per kind of line the CLI prints.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// The `→` marker in front of a step when no spinner is shown.
    pub step: Style,
    /// Commands in `plan`, secondary detail.
    pub dim: Style,
    pub bold: Style,
    pub header: Style,
}

impl Styles {
    /// ANSI colors for a terminal that accepts them.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            step: Style::new().cyan(),
            dim: Style::new().dimmed(),
            bold: Style::new().bold(),
            header: Style::new().bold().cyan(),
        }
    }
}
