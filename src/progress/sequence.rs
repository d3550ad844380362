//! Progress-tracked iteration over a fixed list of items.
//!
//! [`TrackedSequence`] pairs every item with a [`StepContext`] and moves one
//! progress bar along as the caller pulls items. It is lazy, finite and
//! cannot be restarted: the bar finishes once the last item has been pulled,
//! or when the sequence is dropped early.
//!
//! ```rust
//! use ezpl::progress::{ProgressBarOpts, TrackedSequence};
//!
//! let deps = vec!["serde".to_string(), "tracing".to_string()];
//! let items = deps.into_iter().map(|d| (format!("Installing {d}"), d)).collect();
//! let mut installed = Vec::new();
//! for (ctx, dep) in TrackedSequence::new(items, ProgressBarOpts::hidden(), "Installed") {
//!     assert_eq!(ctx.total(), 2);
//!     installed.push(dep);
//! }
//! assert_eq!(installed, ["serde", "tracing"]);
//! ```

use super::style::ProgressBarOpts;
use indicatif::ProgressBar;
use std::fmt;
use std::vec::IntoIter;

/// Where an item sits inside its sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepContext {
    index: usize,
    total: usize,
    label: String,
}

impl StepContext {
    /// Zero-based index of the item.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based position of the item, as shown on the bar.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_last(&self) -> bool {
        self.position() == self.total
    }
}

impl fmt::Display for StepContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] {}", self.position(), self.total, self.label)
    }
}

/// Lazy `(StepContext, item)` iterator driving one progress bar.
pub struct TrackedSequence<T> {
    items: IntoIter<(String, T)>,
    bar: ProgressBar,
    total: usize,
    next_index: usize,
    finish_message: String,
    finished: bool,
}

impl<T> TrackedSequence<T> {
    /// Track `items`, each paired with the label shown while it is current.
    pub fn new(items: Vec<(String, T)>, opts: ProgressBarOpts, finish_message: impl Into<String>) -> Self {
        let total = items.len();
        let bar = opts.to_progress_bar(total as u64);
        Self {
            items: items.into_iter(),
            bar,
            total,
            next_index: 0,
            finish_message: finish_message.into(),
            finished: false,
        }
    }

    /// Number of items pulled so far.
    pub fn pulled(&self) -> usize {
        self.next_index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The bar this sequence drives.
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if self.next_index >= self.total {
            self.bar.set_position(self.total as u64);
            self.bar.finish_with_message(self.finish_message.clone());
        } else {
            self.bar.abandon();
        }
    }
}

impl<T> Iterator for TrackedSequence<T> {
    type Item = (StepContext, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let Some((label, item)) = self.items.next() else {
            self.finish();
            return None;
        };
        let ctx = StepContext {
            index: self.next_index,
            total: self.total,
            label,
        };
        self.next_index += 1;
        self.bar.set_position(ctx.index as u64);
        self.bar.set_message(ctx.label.clone());
        Some((ctx, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.finished {
            true => (0, Some(0)),
            false => self.items.size_hint(),
        }
    }
}

impl<T> Drop for TrackedSequence<T> {
    fn drop(&mut self) {
        self.finish();
    }
}

impl<T> fmt::Debug for TrackedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedSequence")
            .field("pulled", &self.next_index)
            .field("total", &self.total)
            .field("finished", &self.finished)
            .finish()
    }
}
