//! Escaping of IRIs and string literals embedded in query text.

use std::fmt::Write;

/// Render `value` as an IRI reference (`<...>`).
///
/// Characters that may not appear inside `IRIREF` are percent-encoded, so a
/// URL scraped from a page can never terminate the reference early.
pub fn iri(value: &str) -> String {
    format!("<{}>", iri_value(value))
}

/// The text an IRI reference built by [`iri`] stores, without the brackets.
pub fn iri_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                let _ = write!(out, "%{:02X}", c as u32);
            }
            c if (c as u32) <= 0x20 => {
                let _ = write!(out, "%{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Render `value` as a double-quoted string literal.
pub fn literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
