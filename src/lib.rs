//! Ezpl is a crate coordinating colorized console output, a plain-text log
//! file and a layered progress engine behind one context object.
//!
//! # Quick Start
//!
//! ```rust
//! use ezpl::progress::StageDescriptor;
//! use ezpl::{Ezpl, Progress};
//!
//! # fn main() -> ezpl::Result<()> {
//! let ezpl = Ezpl::builder()
//!     .hidden_progress(true)
//!     .log_file(std::env::temp_dir().join("ezpl-quickstart.log"))
//!     .build()?;
//! ezpl.printer().info("Installing");
//!
//! let stages = vec![
//!     StageDescriptor::main("main", "Install"),
//!     StageDescriptor::download("fetch", "Downloading", 1_024_000).with_filename("pkg.zip"),
//!     StageDescriptor::steps("setup", "Setting up", [("Unpack", "Unpacking"), ("Link", "Linking")]),
//! ];
//! let session = ezpl.layered_progress(&stages, false)?;
//! session.update_layer("fetch", Progress::Advance(1_024_000), None)?;
//! session.complete_layer("fetch")?;
//! session.advance_layer("setup", None)?;
//! session.advance_layer("setup", None)?;
//! assert_eq!(session.umbrella_fraction(), Some(1.0));
//! session.close();
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`level`] - Severity levels, semantic patterns and their styling
//! - [`indent`] - The indentation depth shared by console and file output
//! - [`progress`] - Layered progress sessions and single-bar helpers
//! - [`console`] - The printer, the wizard (panels, tables, JSON) and the output sink
//! - [`file`] - The file logger
//! - [`config`] - Configuration, providers and the [`EzplBuilder`]
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod config;
pub mod console;
pub mod error;
pub(crate) mod ezpl;
pub mod file;
pub mod indent;
pub mod level;
pub mod progress;

pub use config::{Config, ConfigProvider, EzplBuilder};
pub use console::{text_of, ConsolePrinter, Output, ToLogText, Wizard};
pub use error::{Error, Result};
pub use ezpl::Ezpl;
pub use file::FileLogger;
pub use indent::{IndentCoordinator, IndentGuard, IndentStyle, MAX_INDENT};
pub use level::{LogLevel, Pattern};
pub use progress::{
    LayeredProgressSession, Progress, ProgressBarOpts, SessionOptions, StageDescriptor,
    StyleOptions,
};
