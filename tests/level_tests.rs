//! Tests for the level and pattern catalog.

use ezpl::level::{self, LogLevel, Pattern};
use ezpl::Error;

#[test]
fn test_is_valid_ignores_case() {
    assert!(level::is_valid("info"));
    assert!(level::is_valid("WARNING"));
    assert!(level::is_valid("Critical"));
    assert!(level::is_valid(" success "));
    assert!(!level::is_valid("verbose"));
    assert!(!level::is_valid(""));
}

#[test]
fn test_attributes_of_known_level() {
    let attrs = level::attributes_of("error").unwrap();
    assert_eq!(attrs.label, "ERROR");
    assert_eq!(attrs.severity, 40);
    assert!(!attrs.fg.is_empty());
    assert!(!attrs.bg.is_empty());
}

#[test]
fn test_attributes_of_unknown_level_fails() {
    assert!(matches!(
        level::attributes_of("loud"),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_all_level_names_ascend_in_severity() {
    let names = level::all_level_names();
    assert_eq!(
        names,
        ["DEBUG", "INFO", "SUCCESS", "WARNING", "ERROR", "CRITICAL"]
    );
    let severities: Vec<u8> = names
        .iter()
        .map(|name| level::attributes_of(name).unwrap().severity)
        .collect();
    assert!(severities.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_success_filters_like_info() {
    assert_eq!(LogLevel::Success.severity(), LogLevel::Info.severity());
    assert!(LogLevel::Success.passes(LogLevel::Info));
    assert!(!LogLevel::Success.passes(LogLevel::Warning));
    assert!(LogLevel::Info.passes(LogLevel::Success));
    assert!(!LogLevel::Debug.passes(LogLevel::Info));
    assert!(LogLevel::Critical.passes(LogLevel::Error));
}

#[test]
fn test_level_display_round_trips_through_parse() {
    for level in LogLevel::ALL {
        assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
    }
}

#[test]
fn test_patterns_map_onto_levels() {
    assert_eq!(Pattern::Tip.level(), LogLevel::Info);
    assert_eq!(Pattern::Warn.level(), LogLevel::Warning);
    assert_eq!(Pattern::Error.level(), LogLevel::Error);
    assert_eq!(Pattern::Debug.level(), LogLevel::Debug);
    assert_eq!(Pattern::from(LogLevel::Critical), Pattern::Error);
}

#[test]
fn test_pattern_parse() {
    assert_eq!("deps".parse::<Pattern>().unwrap(), Pattern::Deps);
    assert_eq!("INSTALL".parse::<Pattern>().unwrap(), Pattern::Install);
    assert_eq!(Pattern::Config.to_string(), "CONFIG");
    assert!(matches!("NOTE".parse::<Pattern>(), Err(Error::Validation(_))));
}
