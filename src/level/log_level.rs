//! Severity levels and their attributes.

use crate::error::{Error, Result};
use console::Style;
use std::fmt;
use std::str::FromStr;

/// Severity level of a message.
///
/// Ordering follows severity: `Debug < Info < Warning < Error < Critical`.
/// `Success` shares the rank of `Info`, so a threshold of `INFO` lets both
/// through and a threshold of `WARNING` filters both out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
    Critical,
}

/// Static attributes attached to a [`LogLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelAttributes {
    /// Upper-case display label.
    pub label: &'static str,
    /// Numeric severity used for filtering.
    pub severity: u8,
    /// Foreground style token, in `console`'s dotted style syntax.
    pub fg: &'static str,
    /// Background style token, in `console`'s dotted style syntax.
    pub bg: &'static str,
}

impl LogLevel {
    /// Every level in ascending severity.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Success,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn attributes(self) -> LevelAttributes {
        match self {
            LogLevel::Debug => LevelAttributes {
                label: "DEBUG",
                severity: 10,
                fg: "cyan",
                bg: "on_black",
            },
            LogLevel::Info => LevelAttributes {
                label: "INFO",
                severity: 20,
                fg: "white",
                bg: "on_black",
            },
            LogLevel::Success => LevelAttributes {
                label: "SUCCESS",
                severity: 20,
                fg: "green",
                bg: "on_black",
            },
            LogLevel::Warning => LevelAttributes {
                label: "WARNING",
                severity: 30,
                fg: "yellow",
                bg: "on_black",
            },
            LogLevel::Error => LevelAttributes {
                label: "ERROR",
                severity: 40,
                fg: "red.bold",
                bg: "on_black",
            },
            LogLevel::Critical => LevelAttributes {
                label: "CRITICAL",
                severity: 50,
                fg: "white.bold",
                bg: "on_red",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.attributes().label
    }

    pub fn severity(self) -> u8 {
        self.attributes().severity
    }

    /// Whether a message at this level passes a `threshold` filter.
    pub fn passes(self, threshold: LogLevel) -> bool {
        self.severity() >= threshold.severity()
    }

    /// Terminal style combining the foreground and background tokens.
    ///
    /// `Info` keeps the terminal's own background.
    pub fn style(self) -> Style {
        let attrs = self.attributes();
        match self {
            LogLevel::Critical => Style::from_dotted_str(&format!("{}.{}", attrs.fg, attrs.bg)),
            _ => Style::from_dotted_str(attrs.fg),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation(format!("unknown log level {s:?}")))
    }
}

/// Return `true` if `name` is a known level, ignoring case.
pub fn is_valid(name: &str) -> bool {
    name.parse::<LogLevel>().is_ok()
}

/// Look up the attributes of the level called `name`, ignoring case.
pub fn attributes_of(name: &str) -> Result<LevelAttributes> {
    name.parse::<LogLevel>().map(LogLevel::attributes)
}

/// All level labels in ascending severity.
pub fn all_level_names() -> Vec<&'static str> {
    LogLevel::ALL.iter().map(|level| level.label()).collect()
}
