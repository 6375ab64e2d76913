//! Formatter hooks.
//!
//! Hooks turn trace metadata plus the caller's arguments into exactly what a
//! sink receives. They run at log time (buffered mode) or immediately
//! (standalone mode); the result is stored verbatim.

use std::fmt;
use std::sync::Arc;

use tracebuf_core::{LogValue, TraceFields, escape_braces};

/// Argument-list hook: `(fields, args) -> args for the sink`.
pub type ArgsFormatter = Arc<dyn Fn(&TraceFields, Vec<LogValue>) -> Vec<LogValue> + Send + Sync>;

/// Template hook: `(fields, template, args) -> (template, args) for the sink`.
pub type TemplateFormatter =
    Arc<dyn Fn(&TraceFields, &str, Vec<LogValue>) -> (String, Vec<LogValue>) + Send + Sync>;

/// The pair of active hooks.
#[derive(Clone)]
pub struct FormatHooks {
    pub args: ArgsFormatter,
    pub template: TemplateFormatter,
}

impl Default for FormatHooks {
    fn default() -> Self {
        Self {
            args: Arc::new(default_args_format),
            template: Arc::new(default_template_format),
        }
    }
}

impl fmt::Debug for FormatHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatHooks").finish_non_exhaustive()
    }
}

/// Default argument-list layout.
///
/// `[level, "<trace>\t<file>:<line>\t[<title>] <first>", rest...]`
pub fn default_args_format(fields: &TraceFields, values: Vec<LogValue>) -> Vec<LogValue> {
    let prefix = format!(
        "{}\t{}\t[{}]",
        fields.trace_id,
        fields.location(),
        fields.title
    );

    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(LogValue::from(fields.level));

    let mut rest = values.into_iter();
    match rest.next() {
        Some(first) => out.push(LogValue::Str(format!("{prefix} {first}"))),
        None => out.push(LogValue::Str(prefix)),
    }
    out.extend(rest);
    out
}

/// Default template layout.
///
/// `"<level>\t<trace>\t<file>:<line>\t[<title>] <template>"`, arguments untouched.
/// The prefix is brace-escaped so titles never consume arguments.
pub fn default_template_format(
    fields: &TraceFields,
    template: &str,
    values: Vec<LogValue>,
) -> (String, Vec<LogValue>) {
    let prefix = format!(
        "{}\t{}\t{}\t[{}]",
        fields.level,
        fields.trace_id,
        fields.location(),
        fields.title
    );
    (format!("{} {template}", escape_braces(&prefix)), values)
}
