//! Leveled, colorized console messages.

use super::output::Output;
use super::text::ToLogText;
use crate::error::Result;
use crate::indent::IndentCoordinator;
use crate::level::{LogLevel, Pattern};
use std::sync::{Arc, Mutex};

/// Width the tag column is padded to.
const TAG_WIDTH: usize = 8;

/// Prints one styled line per message, filtered by a level threshold and
/// prefixed with the shared indentation.
///
/// ```rust
/// use std::sync::Arc;
/// use ezpl::console::{ConsolePrinter, Output};
/// use ezpl::indent::IndentCoordinator;
/// use ezpl::level::LogLevel;
///
/// let (output, buffer) = Output::buffer();
/// let indent = Arc::new(IndentCoordinator::default());
/// let printer = ConsolePrinter::new(Arc::new(output), indent.clone(), LogLevel::Info);
/// printer.debug("hidden");
/// {
///     let _guard = indent.scoped();
///     printer.info("nested");
/// }
/// assert_eq!(buffer.contents(), "~ >>> INFO     :: nested\n");
/// ```
#[derive(Debug)]
pub struct ConsolePrinter {
    output: Arc<Output>,
    indent: Arc<IndentCoordinator>,
    level: Mutex<LogLevel>,
}

impl ConsolePrinter {
    pub fn new(output: Arc<Output>, indent: Arc<IndentCoordinator>, level: LogLevel) -> Self {
        Self {
            output,
            indent,
            level: Mutex::new(level),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.level.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = level;
    }

    pub fn output(&self) -> &Arc<Output> {
        &self.output
    }

    pub fn indent(&self) -> &Arc<IndentCoordinator> {
        &self.indent
    }

    /// Whether a message at `level` would be printed.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level())
    }

    /// Print `message` at `level`.
    pub fn log(&self, level: LogLevel, message: impl ToLogText) {
        if !self.enabled(level) {
            return;
        }
        let tag = self.output.paint(level.style()).apply_to(format!("{:<TAG_WIDTH$}", level.label()));
        self.emit(&tag.to_string(), &message.to_log_text());
    }

    /// Print `message` tagged with `pattern`, filtered as the pattern's level.
    pub fn pattern(&self, pattern: Pattern, message: impl ToLogText) {
        if !self.enabled(pattern.level()) {
            return;
        }
        let tag = self
            .output
            .paint(pattern.style())
            .apply_to(format!("{:<TAG_WIDTH$}", pattern.label()));
        self.emit(&tag.to_string(), &message.to_log_text());
    }

    /// Print `message` tagged with the pattern called `name`.
    ///
    /// Fails with [`crate::Error::Validation`] when the pattern is unknown.
    pub fn print_pattern(&self, name: &str, message: impl ToLogText) -> Result<()> {
        let pattern: Pattern = name.parse()?;
        self.pattern(pattern, message);
        Ok(())
    }

    /// Continuation lines are aligned under the message column.
    fn emit(&self, tag: &str, message: &str) {
        let prefix = self.indent.render_prefix();
        let mut lines = message.lines();
        let first = lines.next().unwrap_or_default();
        let mut text = format!("{prefix}{tag} :: {first}");
        let continuation = " ".repeat(TAG_WIDTH + 4);
        for line in lines {
            text.push('\n');
            text.push_str(&format!("{prefix}{continuation}{line}"));
        }
        self.output.write_block(&text);
    }

    pub fn debug(&self, message: impl ToLogText) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl ToLogText) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: impl ToLogText) {
        self.log(LogLevel::Success, message);
    }

    pub fn warning(&self, message: impl ToLogText) {
        self.log(LogLevel::Warning, message);
    }

    /// Alias of [`ConsolePrinter::warning`] printed with the `WARN` tag.
    pub fn warn(&self, message: impl ToLogText) {
        self.pattern(Pattern::Warn, message);
    }

    pub fn error(&self, message: impl ToLogText) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl ToLogText) {
        self.log(LogLevel::Critical, message);
    }

    pub fn tip(&self, message: impl ToLogText) {
        self.pattern(Pattern::Tip, message);
    }

    pub fn system(&self, message: impl ToLogText) {
        self.pattern(Pattern::System, message);
    }

    pub fn install(&self, message: impl ToLogText) {
        self.pattern(Pattern::Install, message);
    }

    pub fn detect(&self, message: impl ToLogText) {
        self.pattern(Pattern::Detect, message);
    }

    pub fn config(&self, message: impl ToLogText) {
        self.pattern(Pattern::Config, message);
    }

    pub fn deps(&self, message: impl ToLogText) {
        self.pattern(Pattern::Deps, message);
    }
}
