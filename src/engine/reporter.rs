//! Failure, suggestion and skip diagnostics.

use std::io::{IsTerminal, Write};

use anyhow::Result;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::data::check::{CheckKind, Diagnostic};

/// Sink for diagnostics produced while evaluating checks.
pub trait Reporter {
    /// Reports a failed check with the offending value.
    fn error_message(&mut self, kind: CheckKind, regex: &str, error: &str, actual: &str)
        -> Result<()>;

    /// Reports a remediation hint for a failed check.
    fn suggestion(&mut self, kind: CheckKind, suggest: &str) -> Result<()>;

    /// Reports that a check was declared with an empty regex.
    fn skip_notice(&mut self, kind: CheckKind) -> Result<()>;
}

/// Text of the informational notice for a disabled check.
pub fn skip_notice_text(kind: CheckKind) -> String {
    format!("Not found regex for {}. skip checking.", kind.description())
}

/// Renders colored diagnostics to a terminal stream.
pub struct TerminalReporter<W = StandardStream> {
    out: W,
    failures: usize,
}

impl TerminalReporter<StandardStream> {
    /// Writes to stdout, with color only when stdout is a terminal.
    pub fn stdout() -> Self {
        let choice = if std::io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> TerminalReporter<W> {
    /// Wraps an arbitrary color-capable writer.
    pub fn new(out: W) -> Self {
        Self { out, failures: 0 }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_colored(&mut self, color: Color, bold: bool, text: &str) -> Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
        writeln!(self.out, "{text}")?;
        self.out.reset()?;
        Ok(())
    }
}

impl<W: WriteColor> Reporter for TerminalReporter<W> {
    fn error_message(
        &mut self,
        kind: CheckKind,
        regex: &str,
        error: &str,
        actual: &str,
    ) -> Result<()> {
        if self.failures > 0 {
            writeln!(self.out)?;
        }
        self.failures += 1;

        self.write_colored(Color::Red, true, "Commit rejected by commit-gate.")?;
        writeln!(self.out)?;
        self.write_colored(
            Color::Red,
            false,
            &format!("Type {kind} check failed => {actual}"),
        )?;
        writeln!(self.out, "Pattern: {regex}")?;
        if !error.is_empty() {
            writeln!(self.out, "{}", error.trim_end())?;
        }
        Ok(())
    }

    fn suggestion(&mut self, _kind: CheckKind, suggest: &str) -> Result<()> {
        self.write_colored(Color::Green, false, &format!("Suggest: {suggest}"))
    }

    fn skip_notice(&mut self, kind: CheckKind) -> Result<()> {
        self.write_colored(Color::Yellow, false, &skip_notice_text(kind))
    }
}

/// Records diagnostics for structured output.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Reporter for CollectingReporter {
    fn error_message(
        &mut self,
        kind: CheckKind,
        regex: &str,
        error: &str,
        actual: &str,
    ) -> Result<()> {
        self.diagnostics.push(Diagnostic::Error {
            check: kind,
            regex: regex.to_string(),
            error: error.to_string(),
            actual: actual.to_string(),
        });
        Ok(())
    }

    fn suggestion(&mut self, kind: CheckKind, suggest: &str) -> Result<()> {
        self.diagnostics.push(Diagnostic::Suggestion {
            check: kind,
            suggest: suggest.to_string(),
        });
        Ok(())
    }

    fn skip_notice(&mut self, kind: CheckKind) -> Result<()> {
        self.diagnostics.push(Diagnostic::Skip { check: kind });
        Ok(())
    }
}
