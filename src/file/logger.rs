//! Append-only leveled log file.

use crate::console::ToLogText;
use crate::error::{Error, Result};
use crate::indent::IndentCoordinator;
use crate::level::LogLevel;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Timestamp format of every line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
struct LoggerState {
    path: PathBuf,
    level: LogLevel,
    file: Option<File>,
}

/// Writes one plain-text line per message:
///
/// ```text
/// 2024-05-01 12:00:00 | INFO     | ~ >>> message
/// ```
///
/// Parent directories are created up front; the file itself appears on the
/// first write. Any value with a [`ToLogText`] form can be logged.
/// Rotation and retention are left to external tooling; the logger only
/// appends.
#[derive(Debug)]
pub struct FileLogger {
    state: Mutex<LoggerState>,
    indent: Option<Arc<IndentCoordinator>>,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>, level: LogLevel) -> Self {
        let path = path.into();
        Self::prepare_parent(&path);
        Self {
            state: Mutex::new(LoggerState {
                path,
                level,
                file: None,
            }),
            indent: None,
        }
    }

    /// A failure here resurfaces as [`Error::FileOperation`] on the first write.
    fn prepare_parent(path: &Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent) {
                debug!("Could not create log directory {:?}: {}", parent, e);
            }
        }
    }

    /// Prefix every message with the indentation of `indent`.
    pub fn with_indent(mut self, indent: Arc<IndentCoordinator>) -> Self {
        self.indent = Some(indent);
        self
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn level(&self) -> LogLevel {
        self.lock().level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.lock().level = level;
    }

    pub fn log_file(&self) -> PathBuf {
        self.lock().path.clone()
    }

    /// Write to `path` from now on. The previous file is closed, not moved.
    pub fn set_log_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        Self::prepare_parent(&path);
        let mut state = self.lock();
        state.path = path;
        state.file = None;
        debug!("File logger now writes to {:?}", state.path);
    }

    /// Size of the log file in bytes; zero when it does not exist yet.
    pub fn file_size(&self) -> Result<u64> {
        let path = self.log_file();
        match fs::metadata(&path) {
            Ok(metadata) => Ok(metadata.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(source) => Err(Error::FileOperation { path, source }),
        }
    }

    fn open(path: &Path) -> io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    fn write_lines(state: &mut LoggerState, lines: &[String]) -> io::Result<()> {
        if state.file.is_none() {
            debug!("Opening log file {:?}", state.path);
            state.file = Some(Self::open(&state.path)?);
        }
        let Some(file) = state.file.as_mut() else {
            return Ok(());
        };
        for line in lines {
            writeln!(file, "{line}")?;
        }
        file.flush()
    }

    fn append(&self, lines: &[String]) -> Result<()> {
        let mut state = self.lock();
        Self::write_lines(&mut state, lines).map_err(|source| {
            // Reopen on the next write.
            state.file = None;
            Error::FileOperation {
                path: state.path.clone(),
                source,
            }
        })
    }

    fn timestamp() -> String {
        chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Append `message` at `level`, one line per line of the message.
    pub fn log(&self, level: LogLevel, message: impl ToLogText) -> Result<()> {
        if !level.passes(self.level()) {
            return Ok(());
        }
        let message = message.to_log_text();
        let prefix = self
            .indent
            .as_ref()
            .map(|indent| indent.render_prefix())
            .unwrap_or_default();
        let timestamp = Self::timestamp();
        let lines: Vec<String> = match message.is_empty() {
            true => vec![format_line(&timestamp, level, &prefix, "")],
            false => message
                .lines()
                .map(|line| format_line(&timestamp, level, &prefix, line))
                .collect(),
        };
        self.append(&lines)
    }

    pub fn debug(&self, message: impl ToLogText) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl ToLogText) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn success(&self, message: impl ToLogText) -> Result<()> {
        self.log(LogLevel::Success, message)
    }

    pub fn warning(&self, message: impl ToLogText) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: impl ToLogText) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    pub fn critical(&self, message: impl ToLogText) -> Result<()> {
        self.log(LogLevel::Critical, message)
    }

    /// Append a `==>` marker line, regardless of the level threshold.
    pub fn add_separator(&self) -> Result<()> {
        self.append(&[format!("==> {} <==", Self::timestamp())])
    }
}

fn format_line(timestamp: &str, level: LogLevel, prefix: &str, message: &str) -> String {
    format!("{timestamp} | {:<8} | {prefix}{message}", level.label())
}
