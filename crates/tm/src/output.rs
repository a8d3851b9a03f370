//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Command results go to stdout; diagnostics go to stderr.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green_bold: Style,
    cyan: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green_bold: Style::new().green().bold(),
            cyan: Style::new().cyan(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a plain result line to stdout.
    pub(crate) fn print(&self, msg: &str) -> std::io::Result<()> {
        self.stdout.write_line(msg)
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Style text for the active item (green bold).
    pub(crate) fn active(&self, text: &str) -> String {
        self.green_bold.apply_to(text).to_string()
    }

    /// Style text for an ancestor of the active item (cyan).
    pub(crate) fn ancestor(&self, text: &str) -> String {
        self.cyan.apply_to(text).to_string()
    }

    /// Style secondary text (dim).
    pub(crate) fn dim(&self, text: &str) -> String {
        self.dim.apply_to(text).to_string()
    }

    /// Style a heading (cyan bold).
    pub(crate) fn heading(&self, text: &str) -> String {
        self.cyan_bold.apply_to(text).to_string()
    }
}
