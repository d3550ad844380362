//! Configuration.
//!
//! - `config` - The [`Config`] structure, its defaults and the
//!   [`ConfigProvider`] trait
//! - `builder` - The [`EzplBuilder`] turning a configuration into an
//!   [`crate::Ezpl`]
//!
//! Settings come from builder calls or a provider; nothing is read from
//! the environment or from configuration files.

pub(crate) mod builder;
#[allow(clippy::module_inception)]
pub(crate) mod config;

pub use builder::EzplBuilder;
pub use config::{keys, Config, ConfigProvider, DEFAULT_LOG_FILE};
