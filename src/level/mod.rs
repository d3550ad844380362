//! Level and pattern catalog.
//!
//! This module provides the static registry mapping level and pattern names
//! to their numeric severity and terminal styling. Everything here is
//! immutable and therefore safe to share between threads.
//!
//! # Examples
//!
//! ```rust
//! use ezpl::level::{self, LogLevel};
//!
//! assert!(level::is_valid("warning"));
//! let attrs = level::attributes_of("ERROR").unwrap();
//! assert_eq!(attrs.label, "ERROR");
//! assert!(LogLevel::Debug.severity() < LogLevel::Critical.severity());
//! ```

pub mod log_level;
pub mod pattern;

pub use log_level::{all_level_names, attributes_of, is_valid, LevelAttributes, LogLevel};
pub use pattern::Pattern;
