// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Splitting of content lines into name, parameters and value.

use crate::text::unquote_param;

/// A content line: `NAME *(";" PARAM "=" VALUE) ":" VALUE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    /// Property name as written.
    pub name: &'a str,
    /// Parameters in source order, values unquoted.
    pub params: Vec<(&'a str, String)>,
    /// Raw property value, still escaped.
    pub value: &'a str,
}

impl<'a> ContentLine<'a> {
    /// Splits a (unfolded) line. Returns `None` if there is no value separator
    /// or the name is empty.
    ///
    /// Colons and semicolons inside DQUOTE-quoted parameter values do not
    /// split the line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let colon = find_unquoted(line, ':')?;
        let head = line.get(..colon)?;
        let value = line.get(colon + 1..)?;

        let mut parts = split_unquoted(head, ';').into_iter();
        let name = parts.next().filter(|name| !name.is_empty())?;
        let params = parts
            .filter_map(|param| {
                let (key, value) = param.split_once('=')?;
                (!key.is_empty()).then(|| (key, unquote_param(value)))
            })
            .collect();

        Some(Self {
            name,
            params,
            value,
        })
    }

    /// Whether the property name equals `name`, ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First value of the parameter `name`. Parameter names are case-sensitive.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Joins folded continuation lines (lines starting with a space or tab).
pub fn unfold(src: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in src.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(continuation) = raw.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        if !raw.trim().is_empty() {
            lines.push(raw.to_string());
        }
    }
    lines
}

fn find_unquoted(s: &str, needle: char) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c == needle && !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_unquoted(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;
    while let Some(i) = find_unquoted(rest, separator) {
        let (part, tail) = rest.split_at(i);
        parts.push(part);
        rest = tail.get(separator.len_utf8()..).unwrap_or_default();
    }
    parts.push(rest);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_line() {
        let line = ContentLine::parse("SUMMARY:Team Meeting").unwrap();
        assert_eq!(line.name, "SUMMARY");
        assert!(line.params.is_empty());
        assert_eq!(line.value, "Team Meeting");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let line = ContentLine::parse("DESCRIPTION:see https://example.com").unwrap();
        assert_eq!(line.value, "see https://example.com");
    }

    #[test]
    fn ignores_separators_inside_quotes() {
        let line =
            ContentLine::parse("ATTENDEE;CN=\"Doe; John: Esq.\";ROLE=CHAIR:mailto:j@d.com")
                .unwrap();
        assert_eq!(line.name, "ATTENDEE");
        assert_eq!(line.param("CN"), Some("Doe; John: Esq."));
        assert_eq!(line.param("ROLE"), Some("CHAIR"));
        assert_eq!(line.value, "mailto:j@d.com");
    }

    #[test]
    fn parameter_names_are_case_sensitive() {
        let line = ContentLine::parse("ATTENDEE;cn=Alice:mailto:a@b.com").unwrap();
        assert_eq!(line.param("CN"), None);
        assert_eq!(line.param("cn"), Some("Alice"));
    }

    #[test]
    fn property_names_are_case_insensitive() {
        let line = ContentLine::parse("summary:x").unwrap();
        assert!(line.is("SUMMARY"));
    }

    #[test]
    fn rejects_lines_without_value() {
        assert!(ContentLine::parse("BROKEN").is_none());
        assert!(ContentLine::parse(":value").is_none());
    }

    #[test]
    fn unfolds_continuation_lines() {
        let lines = unfold("DESCRIPTION:Hello\r\n  World\r\nSUMMARY:x\r\n\r\n");
        assert_eq!(lines, vec!["DESCRIPTION:Hello World", "SUMMARY:x"]);
    }
}
