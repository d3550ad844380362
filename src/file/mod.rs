//! File logging.
//!
//! [`FileLogger`] appends plain-text lines to a single log file, filtered
//! by its own level threshold and sharing the console's indentation.

pub(crate) mod logger;

pub use logger::{FileLogger, TIMESTAMP_FORMAT};
