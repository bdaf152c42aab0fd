//! Date format handling.
//!
//! Stored date formats use the legacy token syntax (`Y-m-d`, `d/m/Y`) that
//! earlier releases persisted. This module translates those tokens to
//! strftime specifiers for rendering and validates submitted formats.

use chrono::{DateTime, Utc};

/// Longest accepted format string.
pub const MAX_FORMAT_LEN: usize = 64;

/// Translates a legacy date format to a strftime pattern.
///
/// Unknown characters pass through as literals; a backslash escapes the
/// following character. Every specifier this function emits is valid, so
/// the result is always safe to format with.
pub fn translate(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('%') => out.push_str("%%"),
                Some(escaped) => out.push(escaped),
                None => {}
            },
            '%' => out.push_str("%%"),
            'd' => out.push_str("%d"),
            'j' => out.push_str("%-d"),
            'D' => out.push_str("%a"),
            'l' => out.push_str("%A"),
            'N' => out.push_str("%u"),
            'm' => out.push_str("%m"),
            'n' => out.push_str("%-m"),
            'M' => out.push_str("%b"),
            'F' => out.push_str("%B"),
            'Y' => out.push_str("%Y"),
            'y' => out.push_str("%y"),
            'H' => out.push_str("%H"),
            'G' => out.push_str("%-H"),
            'h' => out.push_str("%I"),
            'g' => out.push_str("%-I"),
            'i' => out.push_str("%M"),
            's' => out.push_str("%S"),
            'A' => out.push_str("%p"),
            'a' => out.push_str("%P"),
            'T' => out.push_str("%Z"),
            'U' => out.push_str("%s"),
            'c' => out.push_str("%+"),
            'r' => out.push_str("%a, %d %b %Y %H:%M:%S %z"),
            other => out.push(other),
        }
    }

    out
}

/// Returns whether a submitted format is acceptable for storage.
pub fn is_valid(format: &str) -> bool {
    !format.trim().is_empty() && format.chars().count() <= MAX_FORMAT_LEN
}

/// Renders a timestamp with a legacy format string.
pub fn preview(format: &str, at: DateTime<Utc>) -> String {
    at.format(&translate(format)).to_string()
}
