//! Shared indentation depth for console and file output.
//!
//! The [`IndentCoordinator`] owns a bounded nesting depth. Printers and the
//! file logger ask it for the current prefix; callers nest output with the
//! scoped guard returned by [`IndentCoordinator::scoped`].
//!
//! # Examples
//!
//! ```rust
//! use ezpl::indent::{IndentCoordinator, IndentStyle};
//!
//! let indent = IndentCoordinator::new(IndentStyle::default());
//! {
//!     let _outer = indent.scoped();
//!     let _inner = indent.scoped();
//!     assert_eq!(indent.current_depth(), 2);
//! }
//! assert_eq!(indent.current_depth(), 0);
//! ```

pub(crate) mod coordinator;

pub use coordinator::{IndentCoordinator, IndentGuard, IndentStyle, MAX_INDENT};
