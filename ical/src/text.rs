// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Escaping of TEXT values (RFC 5545 section 3.3.11) and quoted parameter
//! values (RFC 6868).

/// Escapes a TEXT value for use in a content line.
///
/// - Backslash → `\\`
/// - Semicolon → `\;`
/// - Comma → `\,`
/// - Newline → `\n`
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {} // Skip CR characters
            _ => result.push(c),
        }
    }
    result
}

/// Reverses [`escape_text`]. Unknown escapes keep the escaped character.
#[must_use]
pub fn unescape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(escaped) => result.push(escaped),
            None => result.push('\\'),
        }
    }
    result
}

/// Renders a parameter value as a DQUOTE-quoted string.
///
/// DQUOTE, caret and newline cannot appear literally in a quoted value and are
/// written with the RFC 6868 caret encoding.
#[must_use]
pub fn quote_param(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        match c {
            '^' => result.push_str("^^"),
            '"' => result.push_str("^'"),
            '\n' => result.push_str("^n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Strips surrounding quotes from a parameter value and decodes the caret
/// encoding.
#[must_use]
pub fn unquote_param(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '^' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('^') => result.push('^'),
            Some('\'') => result.push('"'),
            Some('n') => result.push('\n'),
            // Not an escape sequence, keep both characters
            Some(other) => {
                result.push('^');
                result.push(other);
            }
            None => result.push('^'),
        }
    }
    result
}
