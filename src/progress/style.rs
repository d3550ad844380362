//! Progress bar styling and configuration options.
//!
//! This module provides the templates used by layered sessions and by the
//! single-bar helpers of the wizard. Layer rows use three styles: one with a
//! bar, one with a spinner, and one for layers that reached a terminal state.
//!
//! # Examples
//!
//! ## Default Styling
//!
//! ```rust
//! use ezpl::progress::StyleOptions;
//!
//! let style_options = StyleOptions::default();
//! assert!(style_options.is_enabled());
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use ezpl::progress::{StyleOptions, ProgressBarOpts};
//!
//! let hidden = StyleOptions::hidden();
//! assert!(!hidden.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

/// Define the layered session style options.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Rows that draw a bar: determinate, byte-counter, step-list, umbrella.
    pub(crate) bar: ProgressBarOpts,
    /// Rows of running spinner layers.
    pub(crate) spinner: ProgressBarOpts,
    /// Rows of completed or errored layers.
    pub(crate) finished: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            bar: ProgressBarOpts {
                template: Some(ProgressBarOpts::TEMPLATE_LAYER_BAR.into()),
                progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
                enabled: true,
                clear: false,
            },
            spinner: ProgressBarOpts {
                template: Some(ProgressBarOpts::TEMPLATE_LAYER_SPINNER.into()),
                progress_chars: None,
                enabled: true,
                clear: false,
            },
            finished: ProgressBarOpts {
                template: Some(ProgressBarOpts::TEMPLATE_LAYER_FINISHED.into()),
                progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
                enabled: true,
                clear: false,
            },
        }
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(bar: ProgressBarOpts, spinner: ProgressBarOpts, finished: ProgressBarOpts) -> Self {
        Self {
            bar,
            spinner,
            finished,
        }
    }

    /// Style options that draw nothing.
    pub fn hidden() -> Self {
        Self::new(
            ProgressBarOpts::hidden(),
            ProgressBarOpts::hidden(),
            ProgressBarOpts::hidden(),
        )
    }

    /// Append an elapsed-time column to every template.
    pub fn with_elapsed(self) -> Self {
        Self {
            bar: self.bar.with_elapsed(),
            spinner: self.spinner.with_elapsed(),
            finished: self.finished.with_elapsed(),
        }
    }

    pub fn set_bar(&mut self, bar: ProgressBarOpts) {
        self.bar = bar;
    }

    pub fn set_spinner(&mut self, spinner: ProgressBarOpts) {
        self.spinner = spinner;
    }

    pub fn set_finished(&mut self, finished: ProgressBarOpts) {
        self.finished = finished;
    }

    /// Return `false` if no row style is enabled.
    pub fn is_enabled(&self) -> bool {
        self.bar.enabled || self.spinner.enabled || self.finished.enabled
    }

    pub fn bar(&self) -> &ProgressBarOpts {
        &self.bar
    }

    pub fn spinner(&self) -> &ProgressBarOpts {
        &self.spinner
    }

    pub fn finished(&self) -> &ProgressBarOpts {
        &self.finished
    }
}

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Layer row with a bar; the message carries percentage, units and label.
    pub const TEMPLATE_LAYER_BAR: &'static str = "{prefix} {bar:30.cyan/blue} {msg}";
    /// Layer row with a spinner.
    pub const TEMPLATE_LAYER_SPINNER: &'static str = "{prefix} {spinner:.cyan} {msg}";
    /// Layer row once the layer is completed or errored.
    pub const TEMPLATE_LAYER_FINISHED: &'static str = "{prefix} {msg}";
    /// Counted bar used by [`Wizard::progress`](crate::Wizard::progress):
    /// `Working ████████████ 11/12 (91%) eta 00:00:02`
    pub const TEMPLATE_BAR_WITH_POSITION: &'static str =
        "{msg} {bar:40.blue} {pos:>}/{len} ({percent}%) eta {eta_precise:.blue}";
    /// Byte transfer bar used for file downloads, with throughput and eta.
    pub const TEMPLATE_PIP: &'static str =
        "{msg} {bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    /// Spinner followed by a message.
    pub const TEMPLATE_SPINNER: &'static str = "{spinner:.green} {msg}";
    /// Step counter followed by the current step.
    pub const TEMPLATE_STEPS: &'static str = "{bar:30.green/black} [{pos}/{len}] {msg}";
    /// Elapsed column appended by [`ProgressBarOpts::with_elapsed`].
    pub const ELAPSED_SUFFIX: &'static str = " {elapsed:.dim}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to indicatif's default bar; progress
    /// display is never worth failing the caller over.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            match ProgressStyle::with_template(&template) {
                Ok(templated) => style = templated,
                Err(e) => debug!("Ignoring invalid progress template {:?}: {}", template, e),
            }
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] based on the provided options.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        // Return a hidden Progress bar if we disabled it.
        if !self.enabled {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }

    /// Create a new [`ProgressBarOpts`] which looks like Python pip.
    pub fn with_pip_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PIP.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: false,
        }
    }

    /// A bar with position, percentage and ETA.
    pub fn with_position_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_BAR_WITH_POSITION.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
            enabled: true,
            clear: false,
        }
    }

    /// A spinner with a message.
    pub fn with_spinner_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_SPINNER.into()),
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }

    /// A step counter with the current step as message.
    pub fn with_steps_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_STEPS.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: false,
        }
    }

    /// Append an elapsed-time column to the template.
    pub fn with_elapsed(mut self) -> Self {
        let template = self.template.take().unwrap_or_else(|| "{wide_bar} {pos}/{len}".into());
        self.template = Some(format!("{template}{}", ProgressBarOpts::ELAPSED_SUFFIX));
        self
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn clears(&self) -> bool {
        self.clear
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }
}
