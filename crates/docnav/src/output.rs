//! Colored terminal output utilities.

use console::{Style, Term};
use docnav_site::{DiagnosticSink, ResolutionError};

/// Terminal output formatter. Writes to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }
}

/// Diagnostic sink printing warnings to the terminal.
pub(crate) struct OutputSink<'a> {
    output: &'a Output,
    reported: usize,
}

impl<'a> OutputSink<'a> {
    pub(crate) fn new(output: &'a Output) -> Self {
        Self {
            output,
            reported: 0,
        }
    }

    /// Number of diagnostics reported so far.
    pub(crate) fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for OutputSink<'_> {
    fn report(&mut self, error: &ResolutionError) {
        self.reported += 1;
        tracing::debug!(id = %error.id, path = %error.containing_path(), "Unresolved reference");
        self.output.warning(&format!("Warning: {error}"));
    }
}
