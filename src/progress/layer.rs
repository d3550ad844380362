//! A single progress track inside a layered session.
//!
//! A [`ProgressLayer`] is pure state: it knows nothing about the terminal.
//! The session projects it into a [`RenderRow`] and hands the row to the
//! display, which keeps layers testable without a TTY.
//!
//! # State machine
//!
//! ```text
//! pending --update--> running --complete()--> completed
//!    |                   |
//!    +-----error()-------+-----error()------> errored
//! ```
//!
//! `completed` and `errored` are terminal: later updates, completions and
//! errors are silently ignored.

use super::stage::{StageDescriptor, StageKind};
use super::units::{format_bytes, fraction, percent_text};
use crate::error::{Error, Result};
use std::fmt;

/// Shape-specific parameters of a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerKind {
    /// Indeterminate activity indicator.
    Spinner,
    /// Bar over a fixed number of units.
    Determinate { total: u64 },
    /// Bar over a byte count, labelled with human-readable sizes.
    ByteCounter { total: u64, filename: Option<String> },
    /// Ordered checklist advanced one step at a time.
    StepList { steps: Vec<(String, String)> },
    /// Derived from the weighted completion of every other layer.
    Umbrella { step_labels: Vec<String> },
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Spinner => "spinner",
            LayerKind::Determinate { .. } => "determinate",
            LayerKind::ByteCounter { .. } => "byte-counter",
            LayerKind::StepList { .. } => "step-list",
            LayerKind::Umbrella { .. } => "umbrella",
        }
    }

    pub fn is_umbrella(&self) -> bool {
        matches!(self, LayerKind::Umbrella { .. })
    }

    /// Whether the caller may move this layer's units.
    fn accepts_units(&self) -> bool {
        !matches!(self, LayerKind::Spinner | LayerKind::Umbrella { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerState {
    Pending,
    Running,
    Completed,
    Errored,
}

impl LayerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LayerState::Completed | LayerState::Errored)
    }

    /// Marker shown in front of the row.
    pub fn icon(self) -> &'static str {
        match self {
            LayerState::Pending => "·",
            LayerState::Running => "▸",
            LayerState::Completed => "✓",
            LayerState::Errored => "✗",
        }
    }
}

/// The unit movement carried by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Move forward by this many units (or steps).
    Advance(u64),
    /// Jump to this absolute unit count (or step index).
    Set(u64),
    /// Change the label only.
    Label,
}

impl Progress {
    fn amount(self) -> u64 {
        match self {
            Progress::Advance(n) | Progress::Set(n) => n,
            Progress::Label => 0,
        }
    }
}

/// Bare numbers are absolute positions.
impl From<u64> for Progress {
    fn from(value: u64) -> Self {
        Progress::Set(value)
    }
}

/// One-line visual projection of a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    pub name: String,
    pub description: String,
    pub state: LayerState,
    /// Whether the row draws a bar (`false` for spinners).
    pub has_bar: bool,
    pub position: u64,
    pub length: Option<u64>,
    /// Completion in `[0.0, 1.0]` when the layer has a positive total.
    pub fraction: Option<f64>,
    /// Rounded percentage, e.g. `"75%"`.
    pub percent: Option<String>,
    /// Unit text such as `"50/100"` or `"500.0 KB / 1000.0 KB"`.
    pub detail: String,
    pub label: String,
}

impl RenderRow {
    pub fn icon(&self) -> &'static str {
        self.state.icon()
    }

    /// The message column: unit detail followed by the label.
    pub fn message(&self) -> String {
        match (self.detail.is_empty(), self.label.is_empty()) {
            (true, _) => self.label.clone(),
            (false, true) => self.detail.clone(),
            (false, false) => format!("{} {}", self.detail, self.label),
        }
    }
}

/// Plain-text rendering, used when the live region cannot draw.
impl fmt::Display for RenderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.description)?;
        if let Some(percent) = &self.percent {
            write!(f, " {percent}")?;
        }
        let message = self.message();
        if !message.is_empty() {
            write!(f, " {message}")?;
        }
        Ok(())
    }
}

/// One independently tracked progress indicator.
#[derive(Debug, Clone)]
pub struct ProgressLayer {
    name: String,
    description: String,
    kind: LayerKind,
    state: LayerState,
    completed_units: u64,
    total_units: Option<u64>,
    label: String,
}

impl ProgressLayer {
    /// Build a layer from its stage descriptor.
    ///
    /// Fails with [`Error::Validation`] when a field required by the stage
    /// type is missing.
    pub fn from_descriptor(stage: &StageDescriptor) -> Result<Self> {
        if stage.name.trim().is_empty() {
            return Err(Error::validation("stage name must not be empty"));
        }
        let kind = match stage.kind {
            StageKind::Main => LayerKind::Umbrella {
                step_labels: stage.steps.iter().map(|(label, _)| label.clone()).collect(),
            },
            StageKind::Spinner => LayerKind::Spinner,
            StageKind::Progress => LayerKind::Determinate {
                total: stage.total.ok_or_else(|| {
                    Error::validation(format!("progress stage {:?} needs a total", stage.name))
                })?,
            },
            StageKind::Download => LayerKind::ByteCounter {
                total: stage.total_size.ok_or_else(|| {
                    Error::validation(format!(
                        "download stage {:?} needs a total_size",
                        stage.name
                    ))
                })?,
                filename: stage.filename.clone(),
            },
            StageKind::Steps => {
                if stage.steps.is_empty() {
                    return Err(Error::validation(format!(
                        "steps stage {:?} needs at least one step",
                        stage.name
                    )));
                }
                LayerKind::StepList {
                    steps: stage.steps.clone(),
                }
            }
        };
        Ok(Self::new(stage.name.clone(), stage.description.clone(), kind))
    }

    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: LayerKind) -> Self {
        let total_units = match &kind {
            LayerKind::Spinner => None,
            LayerKind::Determinate { total } | LayerKind::ByteCounter { total, .. } => Some(*total),
            LayerKind::StepList { steps } => Some(steps.len() as u64),
            LayerKind::Umbrella { .. } => Some(0),
        };
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            state: LayerState::Pending,
            completed_units: 0,
            total_units,
            label: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    pub fn completed_units(&self) -> u64 {
        self.completed_units
    }

    pub fn total_units(&self) -> Option<u64> {
        self.total_units
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Completion in `[0.0, 1.0]`, or `None` for indeterminate layers.
    pub fn fraction(&self) -> Option<f64> {
        fraction(self.completed_units, self.total_units)
    }

    /// Apply an update.
    ///
    /// Unit updates are clamped to the total. A step list completes on the
    /// advance that reaches its last step. Spinner and umbrella layers only
    /// take label changes; a non-zero unit amount on them is rejected with
    /// [`Error::Validation`]. Updates to a terminal layer are ignored.
    pub fn update(&mut self, progress: Progress, label: Option<&str>) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        if !self.kind.accepts_units() && progress.amount() > 0 {
            return Err(Error::validation(format!(
                "{} layer {:?} does not take unit updates",
                self.kind.name(),
                self.name
            )));
        }

        if let Some(total) = self.total_units.filter(|_| self.kind.accepts_units()) {
            self.completed_units = match progress {
                Progress::Advance(n) => self.completed_units.saturating_add(n).min(total),
                Progress::Set(n) => n.min(total),
                Progress::Label => self.completed_units,
            };
        }
        if let Some(label) = label {
            self.label = label.to_string();
        }
        self.state = LayerState::Running;

        if let LayerKind::StepList { steps } = &self.kind {
            if self.completed_units as usize >= steps.len() {
                self.state = LayerState::Completed;
            }
        }
        Ok(())
    }

    /// Mark the layer as completed. Idempotent.
    pub fn complete(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        if let Some(total) = self.total_units {
            self.completed_units = total;
        }
        self.state = LayerState::Completed;
    }

    /// Record a failure on this layer. The message becomes the label.
    pub fn error(&mut self, message: &str) {
        if self.state.is_terminal() {
            return;
        }
        self.label = message.to_string();
        self.state = LayerState::Errored;
    }

    /// Weight of this layer inside an umbrella.
    pub(crate) fn weight(&self) -> u64 {
        match self.total_units {
            Some(total) if total > 0 => total,
            _ => 1,
        }
    }

    /// Weighted units this layer contributes to an umbrella.
    ///
    /// Indeterminate layers count as one unit once completed.
    pub(crate) fn contribution(&self) -> u64 {
        match self.total_units {
            Some(total) if total > 0 => self.completed_units.min(total),
            _ => u64::from(self.state == LayerState::Completed),
        }
    }

    /// Overwrite an umbrella's derived units.
    ///
    /// `all_completed` completes the umbrella, `any_started` moves it from
    /// pending to running.
    pub(crate) fn set_derived(
        &mut self,
        completed: u64,
        total: u64,
        any_started: bool,
        all_completed: bool,
    ) {
        if self.state.is_terminal() {
            return;
        }
        self.total_units = Some(total);
        self.completed_units = completed.min(total);
        if all_completed {
            self.complete();
        } else if any_started && self.state == LayerState::Pending {
            self.state = LayerState::Running;
        }
    }

    /// Project the current state into a row.
    pub fn render_row(&self) -> RenderRow {
        let fraction = self.fraction();
        let detail = match &self.kind {
            LayerKind::Spinner => String::new(),
            LayerKind::Determinate { total } => format!("{}/{}", self.completed_units, total),
            LayerKind::ByteCounter { total, filename } => {
                let sizes = format!(
                    "{} / {}",
                    format_bytes(self.completed_units),
                    format_bytes(*total)
                );
                match filename {
                    Some(filename) => format!("{filename} {sizes}"),
                    None => sizes,
                }
            }
            LayerKind::StepList { steps } => format!("[{}/{}]", self.completed_units, steps.len()),
            LayerKind::Umbrella { .. } => String::new(),
        };
        RenderRow {
            name: self.name.clone(),
            description: self.description.clone(),
            state: self.state,
            has_bar: !matches!(self.kind, LayerKind::Spinner),
            position: self.completed_units,
            length: self.total_units,
            fraction,
            percent: fraction.map(percent_text),
            detail,
            label: self.display_label(fraction),
        }
    }

    /// The caller's label, or a label derived from the current step.
    fn display_label(&self, fraction: Option<f64>) -> String {
        if !self.label.is_empty() || self.state == LayerState::Errored {
            return self.label.clone();
        }
        match &self.kind {
            LayerKind::StepList { steps } if !steps.is_empty() => {
                let index = (self.completed_units as usize).min(steps.len() - 1);
                let (label, description) = &steps[index];
                format!("{label}: {description}")
            }
            LayerKind::Umbrella { step_labels } if !step_labels.is_empty() => {
                let last = step_labels.len() - 1;
                let index = fraction
                    .map(|f| ((f * step_labels.len() as f64) as usize).min(last))
                    .unwrap_or(0);
                step_labels[index].clone()
            }
            _ => String::new(),
        }
    }
}
