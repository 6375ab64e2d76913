//! `tracebuf-core` — shared vocabulary for deferred trace logging.
//!
//! This crate holds the plain data types (no global state, no I/O).

pub mod error;
pub mod fields;
pub mod id;
pub mod severity;
pub mod template;
pub mod value;

pub use error::{ConfigError, ConfigResult, IdParseError, SeverityParseError};
pub use fields::{STANDALONE_TITLE, TraceFields};
pub use id::{EntryId, TraceId};
pub use severity::Severity;
pub use template::{escape_braces, render};
pub use value::{LogValue, join_values};
