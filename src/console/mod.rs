//! Console output.
//!
//! - `output` - The line sink shared by everything below
//! - `printer` - Leveled and pattern-tagged messages
//! - `wizard` - Panels, tables, JSON and progress helpers
//! - `text` - Conversion of arbitrary values into message text

pub(crate) mod output;
pub(crate) mod printer;
pub(crate) mod text;
pub(crate) mod wizard;

pub use output::{Output, SharedBuffer};
pub use printer::ConsolePrinter;
pub use text::{text_of, Opaque, ToLogText};
pub use wizard::{ProgressHandle, Wizard};
