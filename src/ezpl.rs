//! The [`Ezpl`] context object.
//!
//! An [`Ezpl`] owns one console printer, one file logger and the
//! indentation they share, and keeps their levels consistent. It is an
//! ordinary value: create one per application at the entry point and pass
//! it (or an `Arc` of it) to the code that logs.
//!
//! # Examples
//!
//! ```rust
//! use ezpl::{console::Output, EzplBuilder};
//!
//! # fn main() -> ezpl::Result<()> {
//! let dir = std::env::temp_dir().join("ezpl-facade-doc");
//! let (output, buffer) = Output::buffer();
//! let ezpl = EzplBuilder::hidden()
//!     .output(output)
//!     .log_file(dir.join("app.log"))
//!     .build()?;
//!
//! ezpl.printer().info("starting");
//! {
//!     let _indent = ezpl.manage_indent();
//!     ezpl.printer().success("nested");
//! }
//! ezpl.set_level("warning")?;
//! ezpl.printer().info("filtered");
//!
//! assert_eq!(buffer.lines().len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::config::{Config, EzplBuilder};
use crate::console::{ConsolePrinter, Output, Wizard};
use crate::error::Result;
use crate::file::FileLogger;
use crate::indent::{IndentCoordinator, IndentGuard};
use crate::level::LogLevel;
use crate::progress::{LayeredProgressSession, StageDescriptor};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Console printer and file logger sharing levels and indentation.
pub struct Ezpl {
    config: Config,
    indent: Arc<IndentCoordinator>,
    printer: ConsolePrinter,
    logger: FileLogger,
    wizard: Wizard,
}

impl fmt::Debug for Ezpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ezpl")
            .field("printer_level", &self.printer.level())
            .field("logger_level", &self.logger.level())
            .field("log_file", &self.logger.log_file())
            .field("indent", &self.indent.current_depth())
            .finish()
    }
}

impl Ezpl {
    /// Create an [`Ezpl`] with the default settings.
    pub fn new() -> Result<Self> {
        EzplBuilder::new().build()
    }

    pub fn builder() -> EzplBuilder {
        EzplBuilder::new()
    }

    pub(crate) fn from_config(config: Config) -> Result<Self> {
        let indent = Arc::new(IndentCoordinator::new(config.indent_style()?));
        let output = match &config.output {
            Some(output) => output.clone(),
            None if config.colors => Arc::new(Output::stdout()),
            None => Arc::new(Output::stdout().with_colors(false)),
        };
        let printer = ConsolePrinter::new(
            output.clone(),
            indent.clone(),
            config.effective_printer_level(),
        );
        let logger = FileLogger::new(config.log_file.clone(), config.effective_file_logger_level())
            .with_indent(indent.clone());
        let wizard = Wizard::new(output, indent.clone())
            .with_hidden_progress(config.hidden_progress)
            .with_tick_interval(config.tick_interval);
        debug!("Created ezpl with {:?}", config);

        Ok(Self {
            config,
            indent,
            printer,
            logger,
            wizard,
        })
    }

    pub fn printer(&self) -> &ConsolePrinter {
        &self.printer
    }

    pub fn logger(&self) -> &FileLogger {
        &self.logger
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn indent(&self) -> &Arc<IndentCoordinator> {
        &self.indent
    }

    /// The configuration this instance was built from.
    ///
    /// Later level and log file changes are not reflected here.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the level of both the printer and the file logger.
    ///
    /// Fails with [`crate::Error::Validation`] on an unknown level name and
    /// leaves both levels untouched.
    pub fn set_level(&self, level: &str) -> Result<()> {
        let level: LogLevel = level.parse()?;
        self.printer.set_level(level);
        self.logger.set_level(level);
        Ok(())
    }

    pub fn set_printer_level(&self, level: &str) -> Result<()> {
        self.printer.set_level(level.parse()?);
        Ok(())
    }

    pub fn set_logger_level(&self, level: &str) -> Result<()> {
        self.logger.set_level(level.parse()?);
        Ok(())
    }

    /// Indent console and file output until the guard is dropped.
    pub fn manage_indent(&self) -> IndentGuard<'_> {
        self.indent.scoped()
    }

    pub fn reset_indent(&self) {
        self.indent.reset();
    }

    pub fn add_separator(&self) -> Result<()> {
        self.logger.add_separator()
    }

    pub fn log_file(&self) -> PathBuf {
        self.logger.log_file()
    }

    pub fn set_log_file(&self, path: impl Into<PathBuf>) {
        self.logger.set_log_file(path);
    }

    /// Open a layered progress session; see [`Wizard::layered_progress`].
    pub fn layered_progress(
        &self,
        stages: &[StageDescriptor],
        show_elapsed: bool,
    ) -> Result<LayeredProgressSession> {
        self.wizard.layered_progress(stages, show_elapsed)
    }
}
