//! Positional `{}` templates used by the format-string logging mode.
//!
//! Rules:
//! - each `{}` takes the next argument;
//! - `{{` and `}}` are literal braces;
//! - a `{}` with no argument left is kept verbatim;
//! - surplus arguments are appended, space-separated.

use core::fmt::Write as _;

use crate::value::LogValue;

/// Render `template` against `values`.
pub fn render(template: &str, values: &[LogValue]) -> String {
    let mut out = String::with_capacity(template.len() + values.len() * 8);
    let mut next = values.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                match next.next() {
                    Some(v) => {
                        let _ = write!(out, "{v}");
                    }
                    None => out.push_str("{}"),
                }
            }
            other => out.push(other),
        }
    }

    for v in next {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{v}");
    }

    out
}

/// Double every brace so `text` renders back to itself.
pub fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}
