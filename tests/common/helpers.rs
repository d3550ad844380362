#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;
use ezpl::console::{ConsolePrinter, Output, SharedBuffer, Wizard};
use ezpl::indent::IndentCoordinator;
use ezpl::level::LogLevel;
use ezpl::progress::{
    LayeredProgressSession, ProgressBarOpts, SessionOptions, StageDescriptor, StyleOptions,
};
use ezpl::{Ezpl, EzplBuilder};

// Common test constants
pub const TEST_LOG_FILE: &str = "ezpl-test.log";
pub const TEST_DOWNLOAD_SIZE: u64 = 1_024_000;

static SERIAL: Mutex<()> = Mutex::new(());

/// Serializes tests that open layered sessions.
///
/// Only one session may be active per process, and cargo runs the tests of
/// one binary on parallel threads.
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Reads a whole file, panicking with its path on failure
pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

// === Session Helpers ===

/// Session options drawing nothing
pub fn create_hidden_session_options() -> SessionOptions {
    SessionOptions::hidden()
}

/// The umbrella stage plus two progress stages of 100 units each
pub fn create_umbrella_stages() -> Vec<StageDescriptor> {
    vec![
        StageDescriptor::main("main", "Overall"),
        StageDescriptor::progress("a", "First", 100),
        StageDescriptor::progress("b", "Second", 100),
    ]
}

/// A single steps stage with three steps
pub fn create_three_step_stages() -> Vec<StageDescriptor> {
    vec![StageDescriptor::steps(
        "setup",
        "Setting up",
        [
            ("Init", "Initialising"),
            ("Build", "Building"),
            ("Check", "Checking"),
        ],
    )]
}

/// One stage of every kind, umbrella first
pub fn create_mixed_stages() -> Vec<StageDescriptor> {
    vec![
        StageDescriptor::main("main", "Overall").with_step_labels(["Fetch", "Install"]),
        StageDescriptor::spinner("wait", "Waiting"),
        StageDescriptor::download("fetch", "Downloading", TEST_DOWNLOAD_SIZE)
            .with_filename("file.zip"),
        StageDescriptor::progress("process", "Processing", 10),
        StageDescriptor::steps("setup", "Setting up", [("Init", "Initialising"), ("Run", "Running")]),
    ]
}

/// Opens a hidden session over `stages`
pub fn open_hidden_session(stages: &[StageDescriptor]) -> LayeredProgressSession {
    LayeredProgressSession::open(stages, create_hidden_session_options())
        .expect("Failed to open layered session")
}

// === Console Helpers ===

/// Creates a printer writing to an in-memory buffer
pub fn create_buffer_printer(level: LogLevel) -> (ConsolePrinter, SharedBuffer, Arc<IndentCoordinator>) {
    let (output, buffer) = Output::buffer();
    let indent = Arc::new(IndentCoordinator::default());
    let printer = ConsolePrinter::new(Arc::new(output), indent.clone(), level);
    (printer, buffer, indent)
}

/// Creates a wizard writing to an in-memory buffer, with hidden bars
pub fn create_buffer_wizard() -> (Wizard, SharedBuffer, Arc<IndentCoordinator>) {
    let (output, buffer) = Output::buffer();
    let indent = Arc::new(IndentCoordinator::default());
    let wizard = Wizard::new(Arc::new(output), indent.clone()).with_hidden_progress(true);
    (wizard, buffer, indent)
}

/// Creates an ezpl builder writing to a buffer and a log file in `dir`
pub fn create_test_builder(dir: &Path) -> (EzplBuilder, SharedBuffer) {
    let (output, buffer) = Output::buffer();
    let builder = EzplBuilder::hidden()
        .output(output)
        .log_file(dir.join(TEST_LOG_FILE));
    (builder, buffer)
}

/// Creates an ezpl writing to a buffer and a log file in `dir`
pub fn create_test_ezpl(dir: &Path) -> (Ezpl, SharedBuffer) {
    let (builder, buffer) = create_test_builder(dir);
    (builder.build().expect("Failed to build ezpl"), buffer)
}

/// Path of the test log file inside `dir`
pub fn test_log_path(dir: &Path) -> PathBuf {
    dir.join(TEST_LOG_FILE)
}

// === Progress Bar Helpers ===

/// Creates default test progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::new(None, None, true, false)
}

/// Creates hidden progress bar options for testing
pub fn create_hidden_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::hidden()
}

/// Creates custom progress bar options with specific template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(Some(template.to_string()), Some(chars.to_string()), true, false)
}

/// Creates style options with every row style disabled
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::hidden()
}

/// Asserts that style options are enabled
pub fn assert_style_options_enabled(style: &StyleOptions) {
    assert!(style.is_enabled(), "Style options should be enabled");
}

/// Asserts that style options are disabled
pub fn assert_style_options_disabled(style: &StyleOptions) {
    assert!(!style.is_enabled(), "Style options should be disabled");
}

/// Asserts that progress bar options are enabled
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    assert!(opts.is_enabled(), "Progress bar options should be enabled");
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    assert!(!opts.is_enabled(), "Progress bar options should be disabled");
}

/// Asserts that two fractions are equal within floating point noise
pub fn assert_fraction(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("Fraction should be defined");
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected fraction {}, got {}",
        expected,
        actual
    );
}
