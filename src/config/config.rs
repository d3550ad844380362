//! Configuration structures and defaults.
//!
//! This module provides the [`Config`] consumed by [`crate::EzplBuilder`] and
//! the [`ConfigProvider`] trait through which any key/value source can
//! supply the same settings.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//! use ezpl::config::{keys, ConfigProvider};
//! use ezpl::level::LogLevel;
//!
//! let mut values = HashMap::new();
//! values.insert(keys::LOG_LEVEL.to_string(), "debug".to_string());
//! values.insert(keys::INDENT_STEP.to_string(), "2".to_string());
//!
//! assert_eq!(values.log_level().unwrap(), LogLevel::Debug);
//! assert_eq!(values.indent_step().unwrap(), 2);
//! assert_eq!(values.indent_symbol(), ">");
//! ```

use crate::console::Output;
use crate::error::{Error, Result};
use crate::indent::IndentStyle;
use crate::level::LogLevel;
use std::collections::{BTreeMap, HashMap};
use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Names of the configuration keys.
pub mod keys {
    pub const LOG_LEVEL: &str = "log-level";
    pub const PRINTER_LEVEL: &str = "printer-level";
    pub const FILE_LOGGER_LEVEL: &str = "file-logger-level";
    pub const LOG_FILE: &str = "log-file";
    pub const INDENT_STEP: &str = "indent-step";
    pub const INDENT_SYMBOL: &str = "indent-symbol";
    pub const BASE_INDENT_SYMBOL: &str = "base-indent-symbol";
}

/// Name of the log file created in the working directory by default.
pub const DEFAULT_LOG_FILE: &str = "ezpl.log";

/// Settings shared by the printer and the file logger.
#[derive(Clone)]
pub struct Config {
    /// Level applied to both sinks unless overridden.
    pub log_level: LogLevel,
    /// Printer threshold; inherits `log_level` when `None`.
    pub printer_level: Option<LogLevel>,
    /// File logger threshold; inherits `log_level` when `None`.
    pub file_logger_level: Option<LogLevel>,
    pub log_file: PathBuf,
    pub indent_step: usize,
    pub indent_symbol: String,
    pub base_indent_symbol: String,
    /// Color console output when the terminal supports it.
    pub colors: bool,
    /// Draw no progress bars.
    pub hidden_progress: bool,
    /// Redraw interval of spinners and elapsed-time columns.
    pub tick_interval: Duration,
    /// Console sink; standard output when `None`.
    pub output: Option<Arc<Output>>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("log_level", &self.log_level)
            .field("printer_level", &self.printer_level)
            .field("file_logger_level", &self.file_logger_level)
            .field("log_file", &self.log_file)
            .field("indent_step", &self.indent_step)
            .field("indent_symbol", &self.indent_symbol)
            .field("base_indent_symbol", &self.base_indent_symbol)
            .field("colors", &self.colors)
            .field("hidden_progress", &self.hidden_progress)
            .field("tick_interval", &self.tick_interval)
            .field("output", &self.output.is_some())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            printer_level: None,
            file_logger_level: None,
            log_file: current_dir().unwrap_or_default().join(DEFAULT_LOG_FILE),
            indent_step: IndentStyle::DEFAULT_STEP,
            indent_symbol: IndentStyle::DEFAULT_SYMBOL.into(),
            base_indent_symbol: IndentStyle::DEFAULT_BASE.into(),
            colors: true,
            hidden_progress: false,
            tick_interval: Duration::from_millis(100),
            output: None,
        }
    }
}

impl Config {
    pub fn effective_printer_level(&self) -> LogLevel {
        self.printer_level.unwrap_or(self.log_level)
    }

    pub fn effective_file_logger_level(&self) -> LogLevel {
        self.file_logger_level.unwrap_or(self.log_level)
    }

    /// The indentation style, validated.
    pub fn indent_style(&self) -> Result<IndentStyle> {
        IndentStyle::new(
            self.indent_step,
            self.indent_symbol.clone(),
            self.base_indent_symbol.clone(),
        )
    }
}

/// A source of configuration values keyed by the names in [`keys`].
///
/// Only [`ConfigProvider::get`] is required; the typed accessors parse its
/// values and fall back to the defaults of [`Config`].
pub trait ConfigProvider {
    fn get(&self, key: &str) -> Option<String>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Fails with [`Error::Validation`] on an unknown level name.
    fn log_level(&self) -> Result<LogLevel> {
        self.get_or(keys::LOG_LEVEL, LogLevel::Info.label()).parse()
    }

    /// Fails with [`Error::Configuration`] when the value is not a number.
    fn indent_step(&self) -> Result<usize> {
        match self.get(keys::INDENT_STEP) {
            Some(value) => value.trim().parse().map_err(|_| {
                Error::Configuration(format!("{} must be a number, got {value:?}", keys::INDENT_STEP))
            }),
            None => Ok(IndentStyle::DEFAULT_STEP),
        }
    }

    fn indent_symbol(&self) -> String {
        self.get_or(keys::INDENT_SYMBOL, IndentStyle::DEFAULT_SYMBOL)
    }

    fn base_indent_symbol(&self) -> String {
        self.get_or(keys::BASE_INDENT_SYMBOL, IndentStyle::DEFAULT_BASE)
    }
}

impl ConfigProvider for Config {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            keys::LOG_LEVEL => Some(self.log_level.label().to_string()),
            keys::PRINTER_LEVEL => Some(self.effective_printer_level().label().to_string()),
            keys::FILE_LOGGER_LEVEL => Some(self.effective_file_logger_level().label().to_string()),
            keys::LOG_FILE => Some(self.log_file.display().to_string()),
            keys::INDENT_STEP => Some(self.indent_step.to_string()),
            keys::INDENT_SYMBOL => Some(self.indent_symbol.clone()),
            keys::BASE_INDENT_SYMBOL => Some(self.base_indent_symbol.clone()),
            _ => None,
        }
    }
}

impl<S: std::hash::BuildHasher> ConfigProvider for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigProvider for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}
