//! Buffered log records.

use tracebuf_core::{LogValue, Severity, render};

/// One buffered log call, already run through the active formatter hook.
///
/// The variant decides which sink method the flush uses: `ArgumentList`
/// goes through `Sink::emit`, `FormattedString` through `Sink::emit_template`.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    ArgumentList {
        severity: Severity,
        values: Vec<LogValue>,
    },
    FormattedString {
        severity: Severity,
        template: String,
        values: Vec<LogValue>,
    },
}

impl LogRecord {
    pub fn severity(&self) -> Severity {
        match self {
            LogRecord::ArgumentList { severity, .. } => *severity,
            LogRecord::FormattedString { severity, .. } => *severity,
        }
    }

    pub fn values(&self) -> &[LogValue] {
        match self {
            LogRecord::ArgumentList { values, .. } => values,
            LogRecord::FormattedString { values, .. } => values,
        }
    }

    /// Single-line rendering, mostly useful in tests and diagnostics.
    pub fn rendered(&self) -> String {
        match self {
            LogRecord::ArgumentList { values, .. } => tracebuf_core::join_values(values),
            LogRecord::FormattedString {
                template, values, ..
            } => render(template, values),
        }
    }
}
