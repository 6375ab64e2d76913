//! Trace metadata handed to formatter hooks.

use serde::Serialize;

use crate::id::{EntryId, TraceId};
use crate::severity::Severity;

/// Title used for log calls made outside any trace.
pub const STANDALONE_TITLE: &str = "-";

/// Metadata describing one log call.
///
/// Formatter hooks decide what to do with it; the buffering logic never
/// interprets these fields itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceFields {
    /// Fresh for every log call.
    pub entry_id: EntryId,
    /// Id of the root trace, or a fresh id for standalone calls.
    pub trace_id: TraceId,
    pub severity: Severity,
    /// Severity name (`"Debug"`, `"Info"`, ...).
    pub level: &'static str,
    /// Dash-joined call-chain title of the active frame.
    pub title: String,
    /// Label the active frame was opened with.
    pub func_name: String,
    /// Source file of the call that opened the active frame.
    pub file: &'static str,
    pub line: u32,
}

impl TraceFields {
    /// Fields for a call made outside any trace.
    pub fn standalone(severity: Severity) -> Self {
        Self {
            entry_id: EntryId::new(),
            trace_id: TraceId::new(),
            severity,
            level: severity.name(),
            title: STANDALONE_TITLE.to_string(),
            func_name: String::new(),
            file: "",
            line: 0,
        }
    }

    /// `file:line` of the frame's call site.
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}
