//! Live render region for layered progress.
//!
//! This module provides the [`ProgressDisplay`] struct that owns one
//! indicatif [`MultiProgress`] region and one bar per layer row. It turns
//! [`RenderRow`]s into bar positions, prefixes and messages; it does not
//! know anything about layer semantics.
//!
//! # Examples
//!
//! ```rust
//! use ezpl::progress::{ProgressDisplay, ProgressLayer, StageDescriptor, StyleOptions};
//!
//! let layer = ProgressLayer::from_descriptor(&StageDescriptor::progress("a", "Work", 10)).unwrap();
//! let rows = vec![layer.render_row()];
//! let mut display = ProgressDisplay::new(StyleOptions::hidden(), &rows);
//! display.render(&rows);
//! assert_eq!(display.frames(), 1);
//! display.finish();
//! ```

use super::layer::{LayerState, RenderRow};
use super::style::StyleOptions;
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use tracing::debug;

/// One bar inside the region, remembering which style it currently wears.
struct Slot {
    bar: ProgressBar,
    styled_as: Option<(LayerState, bool)>,
}

/// Progress display manager that coordinates the bars of one session.
pub struct ProgressDisplay {
    /// The multi-progress instance holding every row.
    multi: MultiProgress,
    /// One slot per row, in render order.
    slots: Vec<Slot>,
    /// Style options for the rows.
    style_options: StyleOptions,
    /// Width the descriptions are padded to, so bars line up.
    description_width: usize,
    /// Number of render passes performed.
    frames: u64,
    finished: bool,
}

impl ProgressDisplay {
    /// Create the region with one bar per row.
    ///
    /// Nothing is drawn until the first [`ProgressDisplay::render`].
    pub fn new(style_options: StyleOptions, rows: &[RenderRow]) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };
        let description_width = rows
            .iter()
            .map(|row| console::measure_text_width(&row.description))
            .max()
            .unwrap_or(0);
        let slots = rows
            .iter()
            .map(|row| Slot {
                bar: multi.add(
                    style_options
                        .bar()
                        .clone()
                        .to_progress_bar(row.length.unwrap_or(0)),
                ),
                styled_as: None,
            })
            .collect();

        Self {
            multi,
            slots,
            style_options,
            description_width,
            frames: 0,
            finished: false,
        }
    }

    /// Get the multi-progress instance.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }

    /// Get the bar drawing row `index`.
    pub fn bar(&self, index: usize) -> Option<&ProgressBar> {
        self.slots.get(index).map(|slot| &slot.bar)
    }

    /// Number of render passes performed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Bring every bar in line with its row and redraw.
    pub fn render(&mut self, rows: &[RenderRow]) {
        if self.finished {
            return;
        }
        for (slot, row) in self.slots.iter_mut().zip(rows) {
            Self::sync(
                slot,
                row,
                &self.style_options,
                self.description_width,
            );
        }
        self.frames += 1;
    }

    /// Redraw without changing any row, keeping spinners and clocks moving.
    pub fn tick(&self) {
        if self.finished {
            return;
        }
        for slot in &self.slots {
            slot.bar.tick();
        }
    }

    /// Print a line above the region.
    ///
    /// Falls back to plain stderr when the region cannot print.
    pub fn println(&self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if self.multi.is_hidden() {
            debug!("{}", line);
            return;
        }
        if let Err(e) = self.multi.println(line) {
            debug!("Progress region could not print, falling back: {}", e);
            eprintln!("{line}");
        }
    }

    /// Finish every bar, leaving completed rows drawn (or cleared, depending
    /// on the style options) and freezing the others in their last state.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        for slot in self.slots.drain(..) {
            match slot.styled_as {
                Some((LayerState::Completed, _)) if self.style_options.finished().clears() => {
                    slot.bar.finish_and_clear()
                }
                Some((LayerState::Completed, _)) => slot.bar.finish(),
                _ => slot.bar.abandon(),
            }
        }
    }

    fn sync(slot: &mut Slot, row: &RenderRow, styles: &StyleOptions, width: usize) {
        let wanted = (row.state, row.has_bar);
        if slot.styled_as != Some(wanted) {
            let opts = match wanted {
                (LayerState::Completed | LayerState::Errored, _) => styles.finished(),
                (_, true) => styles.bar(),
                (_, false) => styles.spinner(),
            };
            slot.bar.set_style(opts.clone().to_progress_style());
            slot.styled_as = Some(wanted);
        }

        slot.bar.set_prefix(Self::prefix(row, width));
        if let Some(length) = row.length {
            slot.bar.set_length(length);
        }
        slot.bar.set_position(row.position);
        slot.bar.set_message(Self::message(row));
    }

    fn prefix(row: &RenderRow, width: usize) -> String {
        let icon = match row.state {
            LayerState::Pending => style(row.icon()).dim(),
            LayerState::Running => style(row.icon()).cyan(),
            LayerState::Completed => style(row.icon()).green(),
            LayerState::Errored => style(row.icon()).red().bold(),
        };
        let description = console::pad_str(
            &row.description,
            width,
            console::Alignment::Left,
            None,
        );
        format!("{} {}", icon, style(description).bold())
    }

    fn message(row: &RenderRow) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(percent) = &row.percent {
            parts.push(format!("{percent:>4}"));
        }
        if !row.detail.is_empty() {
            parts.push(style(&row.detail).dim().to_string());
        }
        if !row.label.is_empty() {
            let label = match row.state {
                LayerState::Errored => style(&row.label).red().to_string(),
                LayerState::Completed => style(&row.label).green().to_string(),
                _ => row.label.clone(),
            };
            parts.push(label);
        }
        parts.join(" ")
    }
}

impl Drop for ProgressDisplay {
    fn drop(&mut self) {
        self.finish();
    }
}
