//! Layered progress sessions.
//!
//! A [`LayeredProgressSession`] multiplexes several differently shaped
//! [`ProgressLayer`]s into one live terminal region. The caller drives every
//! mutation; the session validates the layer name, delegates to the layer,
//! re-derives the umbrella layer and redraws.
//!
//! Only one session may own the terminal at a time. Opening a second one
//! while the first is alive fails with [`Error::SessionActive`].
//!
//! The session is torn down when dropped, so the region is closed on every
//! exit path: normal return, `?` propagation and unwinding panics alike.
//!
//! # Examples
//!
//! ```rust
//! use ezpl::progress::{LayeredProgressSession, SessionOptions, StageDescriptor};
//!
//! # fn main() -> ezpl::Result<()> {
//! let stages = vec![
//!     StageDescriptor::main("main", "Overall"),
//!     StageDescriptor::progress("a", "First", 100),
//!     StageDescriptor::progress("b", "Second", 100),
//! ];
//! let session = LayeredProgressSession::open(&stages, SessionOptions::hidden())?;
//! session.update_layer("a", 50, None)?;
//! session.update_layer("b", 100, Some("done"))?;
//! assert_eq!(session.umbrella_fraction(), Some(0.75));
//! session.close();
//! # Ok(())
//! # }
//! ```

use super::display::ProgressDisplay;
use super::layer::{LayerState, Progress, ProgressLayer, RenderRow};
use super::stage::StageDescriptor;
use super::style::StyleOptions;
use crate::error::{Error, Result};

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Set while a session owns the terminal.
static ACTIVE_SESSION: AtomicBool = AtomicBool::new(false);

/// Return `true` if a layered session currently owns the terminal.
pub fn is_session_active() -> bool {
    ACTIVE_SESSION.load(Ordering::SeqCst)
}

/// Holds the process-wide session slot; releases it when dropped.
struct ActiveSessionGuard;

impl ActiveSessionGuard {
    fn acquire() -> Result<Self> {
        ACTIVE_SESSION
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ActiveSessionGuard)
            .map_err(|_| Error::SessionActive)
    }
}

impl Drop for ActiveSessionGuard {
    fn drop(&mut self) {
        ACTIVE_SESSION.store(false, Ordering::SeqCst);
    }
}

/// Options of a layered session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Show an elapsed-time column, kept moving by a background ticker.
    pub(crate) show_elapsed: bool,
    /// Interval of the background ticker.
    pub(crate) tick_interval: Duration,
    /// Row styles.
    pub(crate) style_options: StyleOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_elapsed: false,
            tick_interval: SessionOptions::DEFAULT_TICK_INTERVAL,
            style_options: StyleOptions::default(),
        }
    }
}

impl SessionOptions {
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(show_elapsed: bool) -> Self {
        Self {
            show_elapsed,
            ..Self::default()
        }
    }

    /// Options that draw nothing; the session still tracks every frame.
    pub fn hidden() -> Self {
        Self {
            style_options: StyleOptions::hidden(),
            ..Self::default()
        }
    }

    pub fn show_elapsed(mut self, show_elapsed: bool) -> Self {
        self.show_elapsed = show_elapsed;
        self
    }

    pub fn tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.style_options = style_options;
        self
    }
}

/// Everything the caller and the ticker share, behind one mutex.
struct SessionState {
    layers: Vec<ProgressLayer>,
    index: HashMap<String, usize>,
    umbrella: Option<usize>,
    aborted: bool,
    abort_message: Option<String>,
    display: ProgressDisplay,
    ticks: u64,
}

impl SessionState {
    fn position(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::validation(format!("unknown layer {name:?}")))
    }

    fn rows(&self) -> Vec<RenderRow> {
        self.layers.iter().map(ProgressLayer::render_row).collect()
    }

    /// Derive the umbrella from every other layer.
    ///
    /// Each layer weighs its total units when it has a positive total and
    /// one unit otherwise; see [`ProgressLayer::contribution`].
    fn recompute_umbrella(&mut self) {
        let Some(umbrella) = self.umbrella else {
            return;
        };
        let mut completed = 0u64;
        let mut total = 0u64;
        let mut any_started = false;
        let mut all_completed = true;
        let mut children = 0usize;
        for (i, layer) in self.layers.iter().enumerate() {
            if i == umbrella {
                continue;
            }
            children += 1;
            total = total.saturating_add(layer.weight());
            completed = completed.saturating_add(layer.contribution());
            any_started |= layer.state() != LayerState::Pending;
            all_completed &= layer.state() == LayerState::Completed;
        }
        self.layers[umbrella].set_derived(completed, total, any_started, children > 0 && all_completed);
    }

    fn render(&mut self) {
        if self.aborted {
            return;
        }
        let rows = self.rows();
        self.display.render(&rows);
    }

    fn tick(&mut self) {
        if self.aborted {
            return;
        }
        self.display.tick();
        self.ticks += 1;
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    // Layer mutations validate before writing, so a panic elsewhere never
    // leaves a half-applied update behind the lock.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Background redraw thread keeping the elapsed column moving.
struct Ticker {
    stop: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    fn spawn(state: Arc<Mutex<SessionState>>, interval: Duration) -> Option<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let spawned = thread::Builder::new()
            .name("ezpl-progress-tick".into())
            .spawn(move || loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => lock(&state).tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            });
        match spawned {
            Ok(handle) => Some(Self {
                stop,
                handle: Some(handle),
            }),
            Err(e) => {
                debug!("Could not start the progress ticker, elapsed time will only move on updates: {}", e);
                None
            }
        }
    }

    /// Stop the thread and wait for it, so no tick can land after teardown.
    fn stop(&mut self) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("Progress ticker panicked");
            }
        }
    }
}

/// A named collection of progress layers sharing one live render region.
pub struct LayeredProgressSession {
    state: Arc<Mutex<SessionState>>,
    ticker: Option<Ticker>,
    closed: bool,
    // Released last, after the region is torn down.
    _active: ActiveSessionGuard,
}

impl fmt::Debug for LayeredProgressSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("LayeredProgressSession")
            .field("layers", &state.layers)
            .field("umbrella", &state.umbrella)
            .field("aborted", &state.aborted)
            .field("ticker", &self.ticker.is_some())
            .finish()
    }
}

impl LayeredProgressSession {
    /// Open a session with one layer per stage, in the given order.
    ///
    /// Fails with [`Error::Validation`] on duplicate stage names, more than
    /// one `main` stage or a stage missing its kind-specific fields, and
    /// with [`Error::SessionActive`] when another session is still open.
    pub fn open(stages: &[StageDescriptor], options: SessionOptions) -> Result<Self> {
        let mut layers = Vec::with_capacity(stages.len());
        let mut index = HashMap::with_capacity(stages.len());
        let mut umbrella = None;
        for stage in stages {
            let layer = ProgressLayer::from_descriptor(stage)?;
            if index.insert(stage.name.clone(), layers.len()).is_some() {
                return Err(Error::validation(format!(
                    "duplicate stage name {:?}",
                    stage.name
                )));
            }
            if layer.kind().is_umbrella() {
                if umbrella.is_some() {
                    return Err(Error::validation("at most one main stage is allowed"));
                }
                umbrella = Some(layers.len());
            }
            layers.push(layer);
        }

        let active = ActiveSessionGuard::acquire()?;
        debug!("Opening layered progress session with {} layers", layers.len());

        let style_options = match options.show_elapsed {
            true => options.style_options.with_elapsed(),
            false => options.style_options,
        };
        let rows: Vec<RenderRow> = layers.iter().map(ProgressLayer::render_row).collect();
        let display = ProgressDisplay::new(style_options, &rows);

        let mut state = SessionState {
            layers,
            index,
            umbrella,
            aborted: false,
            abort_message: None,
            display,
            ticks: 0,
        };
        state.recompute_umbrella();
        state.render();

        let state = Arc::new(Mutex::new(state));
        let ticker = match options.show_elapsed {
            true => Ticker::spawn(state.clone(), options.tick_interval),
            false => None,
        };

        Ok(Self {
            state,
            ticker,
            closed: false,
            _active: active,
        })
    }

    /// Move a layer's units and/or change its label.
    ///
    /// Bare numbers are absolute positions; use [`Progress::Advance`] to
    /// move relative to the current one. Fails with [`Error::Validation`]
    /// when `name` is unknown or the layer kind cannot take the update; the
    /// session is left untouched in both cases. After
    /// [`LayeredProgressSession::emergency_stop`] this is a no-op.
    pub fn update_layer(
        &self,
        name: &str,
        progress: impl Into<Progress>,
        label: Option<&str>,
    ) -> Result<()> {
        let mut state = lock(&self.state);
        if state.aborted {
            return Ok(());
        }
        let i = state.position(name)?;
        state.layers[i].update(progress.into(), label)?;
        state.recompute_umbrella();
        state.render();
        Ok(())
    }

    /// Advance a layer by one unit or step.
    pub fn advance_layer(&self, name: &str, label: Option<&str>) -> Result<()> {
        self.update_layer(name, Progress::Advance(1), label)
    }

    /// Mark a layer as completed. Completing it twice changes nothing.
    ///
    /// The umbrella layer completes on its own once every other layer has;
    /// completing it by name is accepted and ignored.
    pub fn complete_layer(&self, name: &str) -> Result<()> {
        let mut state = lock(&self.state);
        if state.aborted {
            return Ok(());
        }
        let i = state.position(name)?;
        if state.umbrella == Some(i) {
            debug!("Ignoring direct completion of umbrella layer {:?}", name);
            return Ok(());
        }
        state.layers[i].complete();
        state.recompute_umbrella();
        state.render();
        Ok(())
    }

    /// Record a failure on one layer without stopping the others.
    ///
    /// The errored layer keeps counting towards the umbrella with the units
    /// it reached, not as finished. The umbrella itself only reflects its
    /// children, so an error reported against it is ignored.
    pub fn handle_error(&self, name: &str, message: &str) -> Result<()> {
        let mut state = lock(&self.state);
        if state.aborted {
            return Ok(());
        }
        let i = state.position(name)?;
        if state.umbrella == Some(i) {
            debug!("Ignoring error reported on umbrella layer {:?}: {}", name, message);
            return Ok(());
        }
        debug!("Layer {:?} errored: {}", name, message);
        state.layers[i].error(message);
        state.recompute_umbrella();
        state.render();
        Ok(())
    }

    /// Abort the whole session.
    ///
    /// Every layer that is not yet terminal is marked as errored with
    /// `message`, one final frame is drawn together with the stop message,
    /// and every later update, completion or tick is ignored. Calling it
    /// again has no further effect.
    pub fn emergency_stop(&self, message: &str) {
        let mut state = lock(&self.state);
        if state.aborted {
            return;
        }
        warn!("Emergency stop of layered progress session: {}", message);
        for layer in state.layers.iter_mut() {
            layer.error(message);
        }
        state.render();
        state
            .display
            .println(format!("{} {}", console::style("✗ Emergency stop:").red().bold(), message));
        state.aborted = true;
        state.abort_message = Some(message.to_string());
    }

    /// Snapshot of the layer called `name`.
    pub fn layer(&self, name: &str) -> Option<ProgressLayer> {
        let state = lock(&self.state);
        let i = state.index.get(name).copied()?;
        Some(state.layers[i].clone())
    }

    /// Snapshot of every layer, in render order.
    pub fn layers(&self) -> Vec<ProgressLayer> {
        lock(&self.state).layers.clone()
    }

    /// Current rows, in render order.
    pub fn rows(&self) -> Vec<RenderRow> {
        lock(&self.state).rows()
    }

    /// Completion of the umbrella layer, if the session has one.
    pub fn umbrella_fraction(&self) -> Option<f64> {
        let state = lock(&self.state);
        state.umbrella.and_then(|i| state.layers[i].fraction())
    }

    pub fn is_aborted(&self) -> bool {
        lock(&self.state).aborted
    }

    pub fn abort_message(&self) -> Option<String> {
        lock(&self.state).abort_message.clone()
    }

    /// Number of frames rendered by caller-driven mutations.
    pub fn frames(&self) -> u64 {
        lock(&self.state).display.frames()
    }

    /// Number of redraws performed by the background ticker.
    pub fn ticks(&self) -> u64 {
        lock(&self.state).ticks
    }

    /// Close the region now instead of at the end of the scope.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        let mut state = lock(&self.state);
        state.render();
        state.display.finish();
        debug!("Closed layered progress session");
    }
}

impl Drop for LayeredProgressSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
