//! Bounded indentation depth with scoped push/pop.

use crate::error::{Error, Result};
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

/// Deepest nesting the coordinator will track.
///
/// Pushing past the bound is silently ignored rather than reported: nesting
/// is a cosmetic concern and callers should never fail because of it.
pub const MAX_INDENT: usize = 10;

/// Characters used to draw the indentation prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStyle {
    /// Number of `symbol` repetitions per depth level.
    pub(crate) step: usize,
    /// Symbol repeated for every level.
    pub(crate) symbol: String,
    /// Marker written once in front of any non-empty prefix.
    pub(crate) base: String,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self {
            step: IndentStyle::DEFAULT_STEP,
            symbol: IndentStyle::DEFAULT_SYMBOL.into(),
            base: IndentStyle::DEFAULT_BASE.into(),
        }
    }
}

impl IndentStyle {
    pub const DEFAULT_STEP: usize = 3;
    pub const DEFAULT_SYMBOL: &'static str = ">";
    pub const DEFAULT_BASE: &'static str = "~";

    /// Create a new [`IndentStyle`].
    ///
    /// Fails with [`Error::Configuration`] when `step` is zero or `symbol` is
    /// empty, since the prefix would then not grow with depth.
    pub fn new(step: usize, symbol: impl Into<String>, base: impl Into<String>) -> Result<Self> {
        let symbol = symbol.into();
        if step == 0 {
            return Err(Error::Configuration("indent step must be at least 1".into()));
        }
        if symbol.is_empty() {
            return Err(Error::Configuration("indent symbol must not be empty".into()));
        }
        Ok(Self {
            step,
            symbol,
            base: base.into(),
        })
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Render the prefix for `depth`.
    ///
    /// Depth 0 renders as the empty string. Deeper levels render as
    /// `base`, a space, `symbol` repeated `step * depth` times and a
    /// trailing space.
    pub fn prefix(&self, depth: usize) -> String {
        if depth == 0 {
            return String::new();
        }
        format!("{} {} ", self.base, self.symbol.repeat(self.step * depth))
    }
}

#[derive(Debug)]
struct IndentState {
    depth: usize,
    style: IndentStyle,
}

/// Tracks the nesting depth shared by every output sink of one [`crate::Ezpl`].
///
/// All access goes through an internal mutex so the coordinator can be
/// shared between threads behind an `Arc`.
#[derive(Debug)]
pub struct IndentCoordinator {
    state: Mutex<IndentState>,
}

impl Default for IndentCoordinator {
    fn default() -> Self {
        Self::new(IndentStyle::default())
    }
}

impl IndentCoordinator {
    pub fn new(style: IndentStyle) -> Self {
        Self {
            state: Mutex::new(IndentState { depth: 0, style }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, IndentState> {
        // The state is two plain fields; a panic while holding the lock
        // cannot leave it half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_depth(&self) -> usize {
        self.lock().depth
    }

    /// Increase the depth by one, up to [`MAX_INDENT`].
    ///
    /// Returns `true` when the depth actually changed.
    pub fn push(&self) -> bool {
        let mut state = self.lock();
        if state.depth >= MAX_INDENT {
            trace!("indent already at bound {}", MAX_INDENT);
            return false;
        }
        state.depth += 1;
        true
    }

    /// Decrease the depth by one, stopping at zero.
    ///
    /// Returns `true` when the depth actually changed.
    pub fn pop(&self) -> bool {
        let mut state = self.lock();
        if state.depth == 0 {
            return false;
        }
        state.depth -= 1;
        true
    }

    /// Push now and pop when the returned guard is dropped.
    ///
    /// The pop happens on every exit path, including early returns and
    /// unwinding panics. A guard whose push hit the bound does not pop, so
    /// over-nested scopes leave the outer levels untouched.
    pub fn scoped(&self) -> IndentGuard<'_> {
        let pushed = self.push();
        IndentGuard {
            coordinator: self,
            pushed,
        }
    }

    pub fn reset(&self) {
        self.lock().depth = 0;
    }

    /// The prefix for the current depth.
    pub fn render_prefix(&self) -> String {
        let state = self.lock();
        state.style.prefix(state.depth)
    }

    pub fn style(&self) -> IndentStyle {
        self.lock().style.clone()
    }

    pub fn set_style(&self, style: IndentStyle) {
        self.lock().style = style;
    }
}

/// Scope guard returned by [`IndentCoordinator::scoped`].
#[must_use = "the indentation is removed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct IndentGuard<'a> {
    coordinator: &'a IndentCoordinator,
    pushed: bool,
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.coordinator.pop();
        }
    }
}
