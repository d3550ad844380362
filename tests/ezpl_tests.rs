//! Integration tests for the ezpl facade, its builder and configuration.
//!
//! These tests verify that the printer and the file logger stay consistent
//! when driven through one [`Ezpl`].

use ezpl::config::{keys, Config, ConfigProvider, DEFAULT_LOG_FILE};
use ezpl::level::LogLevel;
use ezpl::progress::{is_session_active, StageDescriptor};
use ezpl::{Error, Ezpl, EzplBuilder};
use std::collections::HashMap;
use std::time::Duration;

mod common;
use common::helpers::*;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.effective_printer_level(), LogLevel::Info);
    assert_eq!(config.effective_file_logger_level(), LogLevel::Info);
    assert!(config.log_file.ends_with(DEFAULT_LOG_FILE));
    assert_eq!(config.indent_step, 3);
    assert_eq!(config.indent_symbol, ">");
    assert_eq!(config.base_indent_symbol, "~");
    assert!(config.colors);
    assert_eq!(config.tick_interval, Duration::from_millis(100));
}

#[test]
fn test_config_as_provider() {
    let config = Config {
        printer_level: Some(LogLevel::Debug),
        ..Config::default()
    };
    assert_eq!(config.get(keys::LOG_LEVEL).as_deref(), Some("INFO"));
    assert_eq!(config.get(keys::PRINTER_LEVEL).as_deref(), Some("DEBUG"));
    assert_eq!(config.get(keys::FILE_LOGGER_LEVEL).as_deref(), Some("INFO"));
    assert_eq!(config.indent_step().unwrap(), 3);
    assert_eq!(config.get("unknown"), None);
    assert_eq!(config.get_or("unknown", "fallback"), "fallback");
}

#[test]
fn test_map_provider_with_bad_values() {
    let mut values = HashMap::new();
    values.insert(keys::INDENT_STEP.to_string(), "many".to_string());
    assert!(matches!(values.indent_step(), Err(Error::Configuration(_))));

    values.insert(keys::LOG_LEVEL.to_string(), "loud".to_string());
    assert!(matches!(values.log_level(), Err(Error::Validation(_))));
}

#[test]
fn test_builder_from_provider() {
    let temp_dir = create_temp_dir();
    let mut values = HashMap::new();
    values.insert(keys::LOG_LEVEL.to_string(), "warning".to_string());
    values.insert(keys::PRINTER_LEVEL.to_string(), "debug".to_string());
    values.insert(keys::INDENT_STEP.to_string(), "1".to_string());
    values.insert(keys::INDENT_SYMBOL.to_string(), "-".to_string());
    values.insert(
        keys::LOG_FILE.to_string(),
        test_log_path(temp_dir.path()).display().to_string(),
    );

    let ezpl = EzplBuilder::from_provider(&values)
        .unwrap()
        .hidden_progress(true)
        .output(ezpl::Output::buffer().0)
        .build()
        .unwrap();

    assert_eq!(ezpl.printer().level(), LogLevel::Debug);
    assert_eq!(ezpl.logger().level(), LogLevel::Warning);
    assert_eq!(ezpl.log_file(), test_log_path(temp_dir.path()));
    let _guard = ezpl.manage_indent();
    assert_eq!(ezpl.indent().render_prefix(), "~ - ");
}

#[test]
fn test_builder_rejects_invalid_settings() {
    assert!(matches!(
        EzplBuilder::hidden().log_level("loud").build(),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        EzplBuilder::hidden().file_logger_level("quiet").build(),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        EzplBuilder::hidden().indent_step(0).build(),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        EzplBuilder::hidden().indent_symbol("").build(),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        EzplBuilder::hidden().tick_interval(Duration::ZERO).build(),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_builder_levels_override_the_shared_level() {
    let temp_dir = create_temp_dir();
    let (builder, _) = create_test_builder(temp_dir.path());
    let ezpl = builder
        .log_level("error")
        .printer_level("debug")
        .build()
        .unwrap();

    assert_eq!(ezpl.printer().level(), LogLevel::Debug);
    assert_eq!(ezpl.logger().level(), LogLevel::Error);
    assert_eq!(ezpl.config().log_level, LogLevel::Error);
}

#[test]
fn test_set_level_updates_both_sinks() {
    let temp_dir = create_temp_dir();
    let (ezpl, _) = create_test_ezpl(temp_dir.path());

    ezpl.set_level("error").unwrap();
    assert_eq!(ezpl.printer().level(), LogLevel::Error);
    assert_eq!(ezpl.logger().level(), LogLevel::Error);

    ezpl.set_printer_level("debug").unwrap();
    ezpl.set_logger_level("critical").unwrap();
    assert_eq!(ezpl.printer().level(), LogLevel::Debug);
    assert_eq!(ezpl.logger().level(), LogLevel::Critical);
}

#[test]
fn test_set_level_with_unknown_name_changes_nothing() {
    let temp_dir = create_temp_dir();
    let (ezpl, _) = create_test_ezpl(temp_dir.path());

    assert!(matches!(ezpl.set_level("loud"), Err(Error::Validation(_))));
    assert!(matches!(
        ezpl.set_printer_level("loud"),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        ezpl.set_logger_level("loud"),
        Err(Error::Validation(_))
    ));
    assert_eq!(ezpl.printer().level(), LogLevel::Info);
    assert_eq!(ezpl.logger().level(), LogLevel::Info);
}

#[test]
fn test_indentation_is_shared_by_console_and_file() {
    let temp_dir = create_temp_dir();
    let (ezpl, buffer) = create_test_ezpl(temp_dir.path());

    {
        let _outer = ezpl.manage_indent();
        let _inner = ezpl.manage_indent();
        ezpl.printer().info("deep");
        ezpl.logger().info("deep").unwrap();
        assert_eq!(ezpl.indent().current_depth(), 2);
    }
    assert_eq!(ezpl.indent().current_depth(), 0);

    assert_eq!(buffer.lines(), ["~ >>>>>> INFO     :: deep"]);
    assert!(read_file(&ezpl.log_file()).contains("| ~ >>>>>> deep"));
}

#[test]
fn test_reset_indent() {
    let temp_dir = create_temp_dir();
    let (ezpl, _) = create_test_ezpl(temp_dir.path());
    ezpl.indent().push();
    ezpl.indent().push();
    ezpl.reset_indent();
    assert_eq!(ezpl.indent().current_depth(), 0);
}

#[test]
fn test_log_file_management() {
    let temp_dir = create_temp_dir();
    let (ezpl, _) = create_test_ezpl(temp_dir.path());
    assert_eq!(ezpl.log_file(), test_log_path(temp_dir.path()));

    ezpl.add_separator().unwrap();
    assert!(read_file(&ezpl.log_file()).starts_with("==> "));

    let moved = temp_dir.path().join("moved.log");
    ezpl.set_log_file(&moved);
    ezpl.logger().error("after move").unwrap();
    assert!(read_file(&moved).contains("after move"));
}

#[test]
fn test_facade_opens_layered_sessions() {
    let _serial = serial();
    let temp_dir = create_temp_dir();
    let (ezpl, _) = create_test_ezpl(temp_dir.path());

    {
        let session = ezpl.layered_progress(&create_umbrella_stages(), true).unwrap();
        assert!(ezpl.layered_progress(&create_umbrella_stages(), false).is_err());
        session.update_layer("a", 100, None).unwrap();
        assert_fraction(session.umbrella_fraction(), 0.5);
    }
    assert!(!is_session_active());

    let stages = vec![StageDescriptor::spinner("only", "Alone")];
    let session = ezpl.layered_progress(&stages, false).unwrap();
    session.complete_layer("only").unwrap();
}

#[test]
fn test_debug_output_is_concise() {
    let temp_dir = create_temp_dir();
    let (ezpl, _) = create_test_ezpl(temp_dir.path());
    let text = format!("{:?}", ezpl);
    assert!(text.starts_with("Ezpl"));
    assert!(text.contains("printer_level"));
}

#[test]
fn test_ezpl_is_shareable_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Ezpl>();
}
