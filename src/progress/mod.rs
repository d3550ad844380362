//! Progress module containing the layered progress engine.
//!
//! This module tracks several differently shaped progress indicators inside
//! one live terminal region and keeps an optional umbrella indicator derived
//! from all of them.
//!
//! # Overview
//!
//! - `stage` - Declarative stage descriptors handed to a session
//! - `layer` - One progress track and its state machine
//! - `session` - The session multiplexing layers into one region
//! - `display` - The indicatif region drawing the rows
//! - `style` - Progress bar styling options and templates
//! - `sequence` - Progress-tracked iteration over fixed item lists
//!
//! # Examples
//!
//! ## Layered Session
//!
//! ```rust
//! use ezpl::progress::{LayeredProgressSession, Progress, SessionOptions, StageDescriptor};
//!
//! # fn main() -> ezpl::Result<()> {
//! let stages = vec![
//!     StageDescriptor::main("main", "Install"),
//!     StageDescriptor::download("fetch", "Downloading", 1_024_000),
//!     StageDescriptor::steps("setup", "Setting up", [("Init", "Initialise"), ("Run", "Running")]),
//! ];
//! let session = LayeredProgressSession::open(&stages, SessionOptions::hidden())?;
//! session.update_layer("fetch", Progress::Advance(512_000), None)?;
//! session.advance_layer("setup", None)?;
//! session.complete_layer("fetch")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Row Styling
//!
//! ```rust
//! use ezpl::progress::{ProgressBarOpts, SessionOptions, StyleOptions};
//!
//! let style_options = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("{prefix} [{bar:40.cyan/blue}] {msg}".to_string()),
//!         Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!         true,
//!         false,
//!     ),
//!     ProgressBarOpts::with_spinner_style(),
//!     ProgressBarOpts::default(),
//! );
//! let options = SessionOptions::new(true).style_options(style_options);
//! ```

pub(crate) mod display;
pub(crate) mod layer;
pub(crate) mod sequence;
pub(crate) mod session;
pub(crate) mod stage;
pub(crate) mod style;
pub(crate) mod units;

pub use display::ProgressDisplay;
pub use layer::{LayerKind, LayerState, Progress, ProgressLayer, RenderRow};
pub use sequence::{StepContext, TrackedSequence};
pub use session::{is_session_active, LayeredProgressSession, SessionOptions};
pub use stage::{StageDescriptor, StageKind};
pub use style::{ProgressBarOpts, StyleOptions};
pub use units::{format_bytes, fraction, percent_text};
