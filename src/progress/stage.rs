//! Declarative stage descriptors consumed by a layered progress session.
//!
//! # Examples
//!
//! ```rust
//! use ezpl::progress::StageDescriptor;
//!
//! let stages = vec![
//!     StageDescriptor::main("main", "Overall"),
//!     StageDescriptor::download("fetch", "Downloading", 1_024_000).with_filename("file.zip"),
//!     StageDescriptor::progress("process", "Processing", 100),
//!     StageDescriptor::steps("setup", "Setting up", [("Init", "Initialise"), ("Run", "Running")]),
//!     StageDescriptor::spinner("wait", "Waiting"),
//! ];
//! assert_eq!(stages.len(), 5);
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The `type` of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Umbrella layer derived from every other layer.
    Main,
    Spinner,
    /// Byte-counted transfer.
    Download,
    /// Determinate bar over `total` units.
    Progress,
    /// Ordered checklist.
    Steps,
}

impl StageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::Main => "main",
            StageKind::Spinner => "spinner",
            StageKind::Download => "download",
            StageKind::Progress => "progress",
            StageKind::Steps => "steps",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(StageKind::Main),
            "spinner" => Ok(StageKind::Spinner),
            "download" => Ok(StageKind::Download),
            "progress" => Ok(StageKind::Progress),
            "steps" => Ok(StageKind::Steps),
            other => Err(Error::validation(format!(
                "unknown stage type {other:?}, expected one of main|spinner|download|progress|steps"
            ))),
        }
    }
}

/// Static description of one layer, given when a session is opened.
///
/// Kind-specific fields are optional here so descriptors can also be
/// assembled field by field; [`crate::progress::ProgressLayer::from_descriptor`]
/// checks that the fields a kind needs are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDescriptor {
    pub name: String,
    pub kind: StageKind,
    pub description: String,
    /// Unit count for `progress` stages.
    pub total: Option<u64>,
    /// Byte count for `download` stages.
    pub total_size: Option<u64>,
    /// Display name for `download` stages.
    pub filename: Option<String>,
    /// `(label, description)` pairs for `steps` stages, and step labels for
    /// a `main` stage.
    pub steps: Vec<(String, String)>,
}

impl StageDescriptor {
    /// Create a descriptor with no kind-specific fields.
    pub fn new(name: impl Into<String>, kind: StageKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            total: None,
            total_size: None,
            filename: None,
            steps: Vec::new(),
        }
    }

    pub fn main(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, StageKind::Main, description)
    }

    pub fn spinner(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, StageKind::Spinner, description)
    }

    pub fn progress(name: impl Into<String>, description: impl Into<String>, total: u64) -> Self {
        Self {
            total: Some(total),
            ..Self::new(name, StageKind::Progress, description)
        }
    }

    pub fn download(
        name: impl Into<String>,
        description: impl Into<String>,
        total_size: u64,
    ) -> Self {
        Self {
            total_size: Some(total_size),
            ..Self::new(name, StageKind::Download, description)
        }
    }

    pub fn steps<I, L, D>(name: impl Into<String>, description: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = (L, D)>,
        L: Into<String>,
        D: Into<String>,
    {
        Self {
            steps: steps
                .into_iter()
                .map(|(label, desc)| (label.into(), desc.into()))
                .collect(),
            ..Self::new(name, StageKind::Steps, description)
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Attach step labels to a `main` stage.
    pub fn with_step_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.steps = labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                (label.clone(), label)
            })
            .collect();
        self
    }
}
