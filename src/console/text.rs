//! Conversion of arbitrary values into log text.
//!
//! [`ToLogText`] never fails. Values without a natural text form can be
//! wrapped in [`Opaque`], which renders a placeholder naming their type.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// Values that can be written as a log message.
pub trait ToLogText {
    fn to_log_text(&self) -> String;
}

/// Convert any supported value to log text.
///
/// ```rust
/// use ezpl::console::{text_of, Opaque};
///
/// assert_eq!(text_of("ready"), "ready");
/// assert_eq!(text_of(&vec![1, 2, 3]), "[1, 2, 3]");
/// assert_eq!(text_of(&Some(4.5)), "4.5");
/// assert!(text_of(&Opaque(&std::time::Duration::ZERO)).contains("Duration"));
/// ```
pub fn text_of<T: ToLogText + ?Sized>(value: &T) -> String {
    value.to_log_text()
}

impl<T: ToLogText + ?Sized> ToLogText for &T {
    fn to_log_text(&self) -> String {
        (**self).to_log_text()
    }
}

impl<T: ToLogText + ?Sized> ToLogText for Box<T> {
    fn to_log_text(&self) -> String {
        (**self).to_log_text()
    }
}

impl ToLogText for str {
    fn to_log_text(&self) -> String {
        self.to_string()
    }
}

impl ToLogText for String {
    fn to_log_text(&self) -> String {
        self.clone()
    }
}

impl ToLogText for fmt::Arguments<'_> {
    fn to_log_text(&self) -> String {
        self.to_string()
    }
}

macro_rules! display_text {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToLogText for $ty {
                fn to_log_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_text!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// `None` renders as `"None"`.
impl<T: ToLogText> ToLogText for Option<T> {
    fn to_log_text(&self) -> String {
        match self {
            Some(value) => value.to_log_text(),
            None => "None".into(),
        }
    }
}

impl<T: ToLogText> ToLogText for [T] {
    fn to_log_text(&self) -> String {
        let items: Vec<String> = self.iter().map(ToLogText::to_log_text).collect();
        format!("[{}]", items.join(", "))
    }
}

impl<T: ToLogText> ToLogText for Vec<T> {
    fn to_log_text(&self) -> String {
        self.as_slice().to_log_text()
    }
}

impl<T: ToLogText, const N: usize> ToLogText for [T; N] {
    fn to_log_text(&self) -> String {
        self.as_slice().to_log_text()
    }
}

fn map_text<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> String
where
    K: ToLogText + 'a,
    V: ToLogText + 'a,
{
    let items: Vec<String> = entries
        .map(|(k, v)| format!("{}: {}", k.to_log_text(), v.to_log_text()))
        .collect();
    format!("{{{}}}", items.join(", "))
}

impl<K: ToLogText, V: ToLogText> ToLogText for BTreeMap<K, V> {
    fn to_log_text(&self) -> String {
        map_text(self.iter())
    }
}

/// Entries are sorted by their text so the output is stable.
impl<K: ToLogText, V: ToLogText, S> ToLogText for HashMap<K, V, S> {
    fn to_log_text(&self) -> String {
        let mut items: Vec<(String, String)> = self
            .iter()
            .map(|(k, v)| (k.to_log_text(), v.to_log_text()))
            .collect();
        items.sort();
        let items: Vec<String> = items.into_iter().map(|(k, v)| format!("{k}: {v}")).collect();
        format!("{{{}}}", items.join(", "))
    }
}

/// Strings render bare, everything else as compact JSON.
impl ToLogText for serde_json::Value {
    fn to_log_text(&self) -> String {
        match self {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl ToLogText for Path {
    fn to_log_text(&self) -> String {
        self.display().to_string()
    }
}

impl ToLogText for PathBuf {
    fn to_log_text(&self) -> String {
        self.as_path().to_log_text()
    }
}

/// Errors render with their whole source chain.
fn error_text(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

impl ToLogText for crate::Error {
    fn to_log_text(&self) -> String {
        error_text(self)
    }
}

impl ToLogText for std::io::Error {
    fn to_log_text(&self) -> String {
        error_text(self)
    }
}

impl ToLogText for dyn std::error::Error + Send + Sync {
    fn to_log_text(&self) -> String {
        error_text(self)
    }
}

/// Fallback wrapper for values with no text form.
#[derive(Debug, Clone, Copy)]
pub struct Opaque<'a, T: ?Sized>(pub &'a T);

impl<T: ?Sized> ToLogText for Opaque<'_, T> {
    fn to_log_text(&self) -> String {
        format!("<{}>", std::any::type_name::<T>())
    }
}
