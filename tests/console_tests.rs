//! Tests for the console printer, the wizard and message conversion.

use ezpl::console::{text_of, Opaque, Output};
use ezpl::level::LogLevel;
use ezpl::progress::{is_session_active, LayerState, StageDescriptor};
use ezpl::Error;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::PathBuf;

mod common;
use common::helpers::*;

// === Printer ===

#[test]
fn test_printer_formats_levels() {
    let (printer, buffer, _) = create_buffer_printer(LogLevel::Debug);

    printer.debug("probe");
    printer.info("hello");
    printer.success("ok");
    printer.warning("careful");
    printer.error("failed");
    printer.critical("down");

    assert_eq!(
        buffer.lines(),
        [
            "DEBUG    :: probe",
            "INFO     :: hello",
            "SUCCESS  :: ok",
            "WARNING  :: careful",
            "ERROR    :: failed",
            "CRITICAL :: down",
        ]
    );
}

#[test]
fn test_printer_filters_below_threshold() {
    let (printer, buffer, _) = create_buffer_printer(LogLevel::Warning);

    printer.debug("hidden");
    printer.info("hidden");
    printer.success("hidden");
    printer.tip("hidden");
    printer.warn("shown");
    printer.error("shown");

    assert_eq!(buffer.lines(), ["WARN     :: shown", "ERROR    :: shown"]);
    assert!(!printer.enabled(LogLevel::Info));
}

#[test]
fn test_printer_level_can_change() {
    let (printer, buffer, _) = create_buffer_printer(LogLevel::Error);
    printer.info("before");
    printer.set_level(LogLevel::Info);
    printer.info("after");
    assert_eq!(printer.level(), LogLevel::Info);
    assert_eq!(buffer.lines(), ["INFO     :: after"]);
}

#[test]
fn test_printer_patterns() {
    let (printer, buffer, _) = create_buffer_printer(LogLevel::Info);

    printer.tip("use --force");
    printer.system("linux");
    printer.install("pkg");
    printer.detect("python 3.12");
    printer.config("loaded");
    printer.deps("3 packages");
    printer.print_pattern("success", "via name").unwrap();

    assert_eq!(
        buffer.lines(),
        [
            "TIP      :: use --force",
            "SYSTEM   :: linux",
            "INSTALL  :: pkg",
            "DETECT   :: python 3.12",
            "CONFIG   :: loaded",
            "DEPS     :: 3 packages",
            "SUCCESS  :: via name",
        ]
    );
}

#[test]
fn test_print_unknown_pattern_fails() {
    let (printer, buffer, _) = create_buffer_printer(LogLevel::Info);
    let result = printer.print_pattern("NOTE", "text");
    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_printer_applies_indentation_to_every_line() {
    let (printer, buffer, indent) = create_buffer_printer(LogLevel::Info);
    {
        let _guard = indent.scoped();
        printer.info("first\nsecond");
    }
    printer.info("flat");

    assert_eq!(
        buffer.lines(),
        [
            "~ >>> INFO     :: first",
            "~ >>>             second",
            "INFO     :: flat",
        ]
    );
}

#[test]
fn test_printer_accepts_any_message_shape() {
    let (printer, buffer, _) = create_buffer_printer(LogLevel::Info);

    printer.info(42);
    printer.info(vec!["a", "b"]);
    printer.info(json!({"key": "value"}));
    printer.info(format_args!("{} + {}", 1, 2));
    printer.info(Opaque(&buffer));

    let lines = buffer.lines();
    assert_eq!(lines[0], "INFO     :: 42");
    assert_eq!(lines[1], "INFO     :: [a, b]");
    assert_eq!(lines[2], r#"INFO     :: {"key":"value"}"#);
    assert_eq!(lines[3], "INFO     :: 1 + 2");
    assert!(lines[4].contains("SharedBuffer"), "{}", lines[4]);
}

#[test]
fn test_colored_output_contains_escapes() {
    let (output, buffer) = Output::buffer();
    let output = output.with_colors(true);
    assert!(output.colors());
    let printer = ezpl::ConsolePrinter::new(
        std::sync::Arc::new(output),
        std::sync::Arc::new(ezpl::IndentCoordinator::default()),
        LogLevel::Info,
    );
    printer.error("red");
    assert!(buffer.contents().contains('\u{1b}'));
}

#[test]
fn test_output_writes_lines_and_blocks() {
    let (output, buffer) = Output::buffer();
    output.write_line("first");
    output.write_line("");
    output.write_block("second\nthird");
    assert_eq!(buffer.contents(), "first\n\nsecond\nthird\n");
}

#[test]
fn test_output_swallows_write_failures() {
    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let output = Output::writer(Broken, false);
    output.write_line("lost");
    output.write_block("also\nlost");
    assert!(!output.colors());
}

// === Message conversion ===

#[test]
fn test_text_of_scalars() {
    assert_eq!(text_of("plain"), "plain");
    assert_eq!(text_of(&String::from("owned")), "owned");
    assert_eq!(text_of(&true), "true");
    assert_eq!(text_of(&-7i64), "-7");
    assert_eq!(text_of(&2.5f64), "2.5");
    assert_eq!(text_of(&'x'), "x");
}

#[test]
fn test_text_of_options_and_sequences() {
    assert_eq!(text_of(&Some("value")), "value");
    assert_eq!(text_of(&None::<u8>), "None");
    assert_eq!(text_of(&[1, 2, 3]), "[1, 2, 3]");
    assert_eq!(text_of(&Vec::<u8>::new()), "[]");
}

#[test]
fn test_text_of_maps_is_stable() {
    let mut hash = HashMap::new();
    hash.insert("b", 2);
    hash.insert("a", 1);
    assert_eq!(text_of(&hash), "{a: 1, b: 2}");

    let mut tree = BTreeMap::new();
    tree.insert("z", "last");
    tree.insert("m", "middle");
    assert_eq!(text_of(&tree), "{m: middle, z: last}");
}

#[test]
fn test_text_of_json_and_paths() {
    assert_eq!(text_of(&json!("bare")), "bare");
    assert_eq!(text_of(&json!([1, "two"])), r#"[1,"two"]"#);
    assert_eq!(text_of(&PathBuf::from("logs/app.log")), PathBuf::from("logs/app.log").display().to_string());
}

#[test]
fn test_text_of_errors_includes_sources() {
    let error = Error::FileOperation {
        path: PathBuf::from("app.log"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(text_of(&error), r#"File operation failed on "app.log": denied"#);

    let boxed: Box<dyn std::error::Error + Send + Sync> = "plain failure".into();
    assert_eq!(text_of(&boxed), "plain failure");
}

#[test]
fn test_text_of_opaque_names_the_type() {
    struct Handle;
    let text = text_of(&Opaque(&Handle));
    assert!(text.starts_with('<') && text.ends_with('>'));
    assert!(text.contains("Handle"));
}

// === Wizard ===

#[test]
fn test_panel_layout() {
    let (wizard, buffer, _) = create_buffer_wizard();
    wizard.info_panel("Plan", "abc");
    assert_eq!(buffer.lines(), ["╭─ Plan ─╮", "│ abc    │", "╰────────╯"]);
}

#[test]
fn test_panel_grows_with_content() {
    let (wizard, buffer, indent) = create_buffer_wizard();
    let _guard = indent.scoped();
    wizard.error_panel("E", "first line\nsecond");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|line| line.starts_with("~ >>> ")));
    assert_eq!(lines[1], "~ >>> │ first line │");
    assert_eq!(lines[2], "~ >>> │ second     │");
}

#[test]
fn test_installation_panel_shows_status() {
    let (wizard, buffer, _) = create_buffer_wizard();
    wizard.installation_panel("Unpack", "success", Some("12 files"));
    let contents = buffer.contents();
    assert!(contents.contains("Installation"));
    assert!(contents.contains("✓ Unpack: success"));
    assert!(contents.contains("12 files"));
}

#[test]
fn test_table_from_records() {
    let (wizard, buffer, _) = create_buffer_wizard();
    let records = vec![
        json!({"name": "serde", "version": "1.0"}),
        json!("not a record"),
        json!({"name": "tracing", "license": "MIT"}),
    ];

    wizard.table(&records, Some("Crates"));

    let contents = buffer.contents();
    assert!(contents.starts_with("Crates\n"));
    for expected in ["name", "version", "license", "serde", "tracing", "MIT"] {
        assert!(contents.contains(expected), "missing {expected} in\n{contents}");
    }
    assert!(!contents.contains("not a record"));
}

#[test]
fn test_table_without_records_prints_nothing() {
    let (wizard, buffer, _) = create_buffer_wizard();
    wizard.table(&[json!(1), json!(null)], Some("Empty"));
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_table_from_columns_pads_short_columns() {
    let (wizard, buffer, _) = create_buffer_wizard();
    wizard.table_from_columns(
        &[("Name", vec!["a", "b", "c"]), ("Size", vec!["1"])],
        None,
    );
    let contents = buffer.contents();
    assert!(contents.contains("Name"));
    assert!(contents.contains("Size"));
    assert!(contents.contains('c'));
}

#[test]
fn test_status_dependency_and_command_tables() {
    let (wizard, buffer, _) = create_buffer_wizard();
    wizard.status_table(&[("archive", "ok"), ("docs", "missing")], None);
    wizard.dependency_table(&[("serde", "1.0", "installed")], None);
    wizard.command_table(&[("install", "Install a package")], None);

    let contents = buffer.contents();
    for expected in [
        "Item", "Status", "archive", "missing", "Dependencies", "Package", "serde",
        "Commands", "install", "Install a package",
    ] {
        assert!(contents.contains(expected), "missing {expected} in\n{contents}");
    }
}

#[test]
fn test_json_is_pretty_printed() {
    let (wizard, buffer, _) = create_buffer_wizard();
    wizard.json(&json!({"a": 1}), None).unwrap();
    assert_eq!(buffer.contents(), "{\n  \"a\": 1\n}\n");

    buffer.clear();
    wizard.json(&json!({"a": 1}), Some("Data")).unwrap();
    assert_eq!(
        buffer.lines(),
        [
            "╭─ Data ───╮",
            "│ {        │",
            "│   \"a\": 1 │",
            "│ }        │",
            "╰──────────╯",
        ]
    );
}

#[test]
fn test_json_str_prints_invalid_json_verbatim() {
    let (wizard, buffer, _) = create_buffer_wizard();
    wizard.json_str("[1,2]", Some("Valid"));
    wizard.json_str("{not json", None);
    assert_eq!(
        buffer.lines(),
        [
            "╭─ Valid ─╮",
            "│ [       │",
            "│   1,    │",
            "│   2     │",
            "│ ]       │",
            "╰─────────╯",
            "{not json",
        ]
    );
}

#[test]
fn test_progress_handles_track_position() {
    let (wizard, _, _) = create_buffer_wizard();

    let mut handle = wizard.progress("Work", 10);
    handle.inc(3);
    handle.set_position(5);
    assert_eq!(handle.position(), 5);
    handle.finish_with_message("done");
    assert!(handle.is_finished());

    let download = wizard.file_download_progress("file.zip", TEST_DOWNLOAD_SIZE);
    download.inc(512_000);
    assert_eq!(download.bar().length(), Some(TEST_DOWNLOAD_SIZE));

    let spinner = wizard.spinner("Waiting");
    spinner.set_message("still waiting");
    assert_eq!(spinner.bar().message(), "still waiting");
}

#[test]
fn test_step_progress_shows_each_step() {
    let (wizard, _, _) = create_buffer_wizard();
    let steps = vec!["Fetch".to_string(), "Build".to_string(), "Test".to_string()];
    let handle = wizard.step_progress(steps);

    assert_eq!(handle.bar().message(), "Fetch");
    handle.next_step();
    assert_eq!(handle.position(), 1);
    assert_eq!(handle.bar().message(), "Build");
}

#[test]
fn test_iterator_helpers_label_items() {
    let (wizard, _, _) = create_buffer_wizard();

    let labels: Vec<String> = wizard
        .dependency_progress(["serde", "tracing"])
        .map(|(ctx, _)| ctx.label().to_string())
        .collect();
    assert_eq!(labels, ["Installing serde", "Installing tracing"]);

    let built: Vec<&str> = wizard
        .build_progress(["compile", "link"])
        .map(|(_, phase)| phase)
        .collect();
    assert_eq!(built, ["compile", "link"]);

    assert_eq!(wizard.package_install_progress(vec![1, 2, 3]).count(), 3);
    let first = wizard.deployment_progress(["staging"]).next().unwrap().0;
    assert_eq!(first.label(), "Deploying: staging");
}

#[test]
fn test_wizard_opens_layered_sessions() {
    let _serial = serial();
    let (wizard, _, _) = create_buffer_wizard();
    let stages = vec![
        StageDescriptor::main("main", "Overall"),
        StageDescriptor::progress("work", "Working", 4),
    ];

    let session = wizard.layered_progress(&stages, false).unwrap();
    session.update_layer("work", 2, None).unwrap();
    assert_fraction(session.umbrella_fraction(), 0.5);
    session.complete_layer("work").unwrap();
    assert_eq!(session.layer("main").unwrap().state(), LayerState::Completed);
    drop(session);

    assert!(!is_session_active());
}
