//! Timestamped formatter hooks.
//!
//! Layout: `<local time> <level> <<file>><<func>><<entry id>>[<title>]`,
//! followed by the caller's arguments (or template).

use chrono::Local;
use tracebuf_chain::{LogValue, Logger, TraceFields};
use tracebuf_core::escape_braces;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Drop everything in `file` before the first occurrence of `marker`.
///
/// An empty or missing marker leaves the path untouched.
pub fn trim_path<'a>(file: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return file;
    }
    match file.find(marker) {
        Some(index) => &file[index..],
        None => file,
    }
}

/// Prefix line for one log call.
pub fn timestamped_prefix(fields: &TraceFields, path_marker: &str) -> String {
    format!(
        "{} {} <{}><{}><{}>[{}]",
        Local::now().format(TIMESTAMP_FORMAT),
        fields.level,
        trim_path(fields.file, path_marker),
        fields.func_name,
        fields.entry_id,
        fields.title
    )
}

/// Replace both hooks of `logger` with the timestamped layout.
///
/// `path_marker` trims source paths (see [`trim_path`]).
pub fn install_timestamped_format(logger: &Logger, path_marker: impl Into<String>) {
    let marker = path_marker.into();

    let args_marker = marker.clone();
    logger.register_format(move |fields: &TraceFields, values: Vec<LogValue>| {
        let mut out = Vec::with_capacity(values.len() + 1);
        out.push(LogValue::Str(timestamped_prefix(fields, &args_marker)));
        out.extend(values);
        out
    });

    logger.register_format_template(move |fields: &TraceFields, template: &str, values: Vec<LogValue>| {
        let prefix = escape_braces(&timestamped_prefix(fields, &marker));
        (format!("{prefix} {template}"), values)
    });
}
