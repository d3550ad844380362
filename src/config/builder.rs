//! Builder pattern implementation for creating [`Ezpl`] instances.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use ezpl::EzplBuilder;
//!
//! # fn main() -> ezpl::Result<()> {
//! let dir = std::env::temp_dir().join("ezpl-builder-doc");
//! let ezpl = EzplBuilder::new()
//!     .log_level("debug")
//!     .log_file(dir.join("app.log"))
//!     .indent_step(2)
//!     .build()?;
//! assert_eq!(ezpl.printer().level().label(), "DEBUG");
//! # Ok(())
//! # }
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use ezpl::EzplBuilder;
//!
//! let builder = EzplBuilder::hidden();
//! ```

use super::config::{keys, Config, ConfigProvider};
use crate::console::Output;
use crate::error::{Error, Result};
use crate::ezpl::Ezpl;
use crate::level::LogLevel;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create an [`Ezpl`].
///
/// Level names are checked when [`EzplBuilder::build`] runs, so the chain
/// itself never fails.
#[derive(Debug, Default)]
pub struct EzplBuilder {
    config: Config,
    log_level: Option<String>,
    printer_level: Option<String>,
    file_logger_level: Option<String>,
}

impl EzplBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        EzplBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        EzplBuilder::default().hidden_progress(true)
    }

    /// Start from an existing [`Config`].
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            ..EzplBuilder::default()
        }
    }

    /// Start from the values of a [`ConfigProvider`].
    ///
    /// Keys the provider does not know keep their defaults.
    pub fn from_provider(provider: &impl ConfigProvider) -> Result<Self> {
        let mut builder = EzplBuilder::new()
            .log_level(provider.log_level()?.label())
            .indent_step(provider.indent_step()?)
            .indent_symbol(provider.indent_symbol())
            .base_indent_symbol(provider.base_indent_symbol());
        builder.printer_level = provider.get(keys::PRINTER_LEVEL);
        builder.file_logger_level = provider.get(keys::FILE_LOGGER_LEVEL);
        if let Some(log_file) = provider.get(keys::LOG_FILE) {
            builder = builder.log_file(log_file);
        }
        Ok(builder)
    }

    /// Level for both the printer and the file logger.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn printer_level(mut self, level: impl Into<String>) -> Self {
        self.printer_level = Some(level.into());
        self
    }

    pub fn file_logger_level(mut self, level: impl Into<String>) -> Self {
        self.file_logger_level = Some(level.into());
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = path.into();
        self
    }

    /// Number of indent symbols per nesting level.
    pub fn indent_step(mut self, step: usize) -> Self {
        self.config.indent_step = step;
        self
    }

    pub fn indent_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.config.indent_symbol = symbol.into();
        self
    }

    pub fn base_indent_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.config.base_indent_symbol = symbol.into();
        self
    }

    pub fn colors(mut self, colors: bool) -> Self {
        self.config.colors = colors;
        self
    }

    /// Send console output to `output` instead of standard output.
    pub fn output(mut self, output: Output) -> Self {
        self.config.output = Some(Arc::new(output));
        self
    }

    pub fn hidden_progress(mut self, hidden: bool) -> Self {
        self.config.hidden_progress = hidden;
        self
    }

    pub fn tick_interval(mut self, tick_interval: Duration) -> Self {
        self.config.tick_interval = tick_interval;
        self
    }

    fn parse_level(name: Option<String>) -> Result<Option<LogLevel>> {
        name.map(|name| name.parse::<LogLevel>()).transpose()
    }

    /// Validate the settings and create the [`Ezpl`].
    ///
    /// Fails with [`Error::Validation`] on unknown level names and with
    /// [`Error::Configuration`] on an invalid indentation style.
    pub fn build(self) -> Result<Ezpl> {
        let mut config = self.config;
        if let Some(level) = Self::parse_level(self.log_level)? {
            config.log_level = level;
        }
        config.printer_level = Self::parse_level(self.printer_level)?.or(config.printer_level);
        config.file_logger_level =
            Self::parse_level(self.file_logger_level)?.or(config.file_logger_level);
        if config.tick_interval.is_zero() {
            return Err(Error::Configuration("tick interval must not be zero".into()));
        }
        Ezpl::from_config(config)
    }
}
