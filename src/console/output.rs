//! Line sink shared by the printer and the wizard.

use console::Style;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Where console output goes.
///
/// Writes are serialized behind a mutex so lines from different threads
/// never interleave. Write failures are swallowed: terminal output is
/// cosmetic and must never fail the caller.
pub struct Output {
    sink: Mutex<Box<dyn Write + Send>>,
    colors: bool,
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").field("colors", &self.colors).finish()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Output {
    /// Standard output, colored when the terminal supports it.
    pub fn stdout() -> Self {
        Self::writer(io::stdout(), console::colors_enabled())
    }

    /// Standard error, colored when the terminal supports it.
    pub fn stderr() -> Self {
        Self::writer(io::stderr(), console::colors_enabled_stderr())
    }

    pub fn writer(writer: impl Write + Send + 'static, colors: bool) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            colors,
        }
    }

    /// An in-memory sink without colors, and a handle to read it back.
    pub fn buffer() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::writer(buffer.clone(), false), buffer)
    }

    /// Override color detection.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    /// `style` with styling forced on or off to match this sink.
    pub fn paint(&self, style: Style) -> Style {
        style.force_styling(self.colors)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write one line followed by a newline.
    pub fn write_line(&self, line: &str) {
        let mut sink = self.lock();
        if let Err(e) = writeln!(sink, "{line}").and_then(|_| sink.flush()) {
            debug!("Dropping console line after write failure: {}", e);
        }
    }

    /// Write a block of text, one line per line of `text`.
    pub fn write_block(&self, text: &str) {
        let mut sink = self.lock();
        let written = text
            .lines()
            .try_for_each(|line| writeln!(sink, "{line}"))
            .and_then(|_| sink.flush());
        if let Err(e) = written {
            debug!("Dropping console block after write failure: {}", e);
        }
    }
}

/// Cloneable in-memory writer backing [`Output::buffer`].
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
