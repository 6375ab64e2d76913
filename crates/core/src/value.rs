//! Caller-supplied log arguments.

use core::fmt;

use serde::Serialize;

/// One argument passed to a log call.
///
/// `Display` renders the bare value (strings are not quoted), so a list of
/// values can be joined into a line the way a plain `{}` would print them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl LogValue {
    /// Capture any displayable value as text.
    pub fn display(value: &impl fmt::Display) -> Self {
        Self::Str(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Str(s) => f.write_str(s),
            LogValue::Int(v) => fmt::Display::fmt(v, f),
            LogValue::UInt(v) => fmt::Display::fmt(v, f),
            LogValue::Float(v) => fmt::Display::fmt(v, f),
            LogValue::Bool(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// Join values with single spaces.
pub fn join_values(values: &[LogValue]) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&v.to_string());
    }
    out
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for LogValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for LogValue {
                fn from(value: $t) -> Self {
                    Self::$variant(value as _)
                }
            }
        )*
    };
}

impl_from_int!(Int: i8, i16, i32, i64, isize);
impl_from_int!(UInt: u8, u16, u32, u64, usize);

/// Build a `Vec<LogValue>` from anything convertible into [`LogValue`].
///
/// ```
/// use tracebuf_core::{args, LogValue};
///
/// let values = args!["retrying", 3, true];
/// assert_eq!(values[1], LogValue::Int(3));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::LogValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogValue::from($value)),+]
    };
}
