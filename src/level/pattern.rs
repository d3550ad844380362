//! Semantic message patterns.
//!
//! A pattern is a tag such as `TIP` or `INSTALL` that the printer shows in
//! place of the bare level label. Each pattern is filtered as the level it
//! maps onto.

use super::LogLevel;
use crate::error::{Error, Result};
use console::Style;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Success,
    Error,
    Warn,
    Tip,
    Debug,
    Info,
    System,
    Install,
    Detect,
    Config,
    Deps,
}

impl Pattern {
    pub const ALL: [Pattern; 11] = [
        Pattern::Success,
        Pattern::Error,
        Pattern::Warn,
        Pattern::Tip,
        Pattern::Debug,
        Pattern::Info,
        Pattern::System,
        Pattern::Install,
        Pattern::Detect,
        Pattern::Config,
        Pattern::Deps,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Pattern::Success => "SUCCESS",
            Pattern::Error => "ERROR",
            Pattern::Warn => "WARN",
            Pattern::Tip => "TIP",
            Pattern::Debug => "DEBUG",
            Pattern::Info => "INFO",
            Pattern::System => "SYSTEM",
            Pattern::Install => "INSTALL",
            Pattern::Detect => "DETECT",
            Pattern::Config => "CONFIG",
            Pattern::Deps => "DEPS",
        }
    }

    /// Style token in `console`'s dotted syntax.
    pub fn color(self) -> &'static str {
        match self {
            Pattern::Success => "green.bold",
            Pattern::Error => "red.bold",
            Pattern::Warn => "yellow.bold",
            Pattern::Tip => "magenta.bold",
            Pattern::Debug => "cyan",
            Pattern::Info => "blue.bold",
            Pattern::System => "blue",
            Pattern::Install => "green",
            Pattern::Detect => "cyan.bold",
            Pattern::Config => "magenta",
            Pattern::Deps => "yellow",
        }
    }

    pub fn style(self) -> Style {
        Style::from_dotted_str(self.color())
    }

    /// The level used when filtering messages tagged with this pattern.
    pub fn level(self) -> LogLevel {
        match self {
            Pattern::Success => LogLevel::Success,
            Pattern::Error => LogLevel::Error,
            Pattern::Warn => LogLevel::Warning,
            Pattern::Debug => LogLevel::Debug,
            Pattern::Tip
            | Pattern::Info
            | Pattern::System
            | Pattern::Install
            | Pattern::Detect
            | Pattern::Config
            | Pattern::Deps => LogLevel::Info,
        }
    }
}

impl From<LogLevel> for Pattern {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Pattern::Debug,
            LogLevel::Info => Pattern::Info,
            LogLevel::Success => Pattern::Success,
            LogLevel::Warning => Pattern::Warn,
            LogLevel::Error | LogLevel::Critical => Pattern::Error,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Pattern::ALL
            .into_iter()
            .find(|pattern| pattern.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation(format!("unknown pattern {s:?}")))
    }
}
