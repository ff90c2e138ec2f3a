// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `ATTENDEE` and `ORGANIZER` property lines.
//!
//! Formatting always resets the participation status to `NEEDS-ACTION`:
//! writing an attendee is (re-)inviting them. The organizer carries no
//! participation parameters at all, its role `CHAIR` is implied.

use crate::content_line::ContentLine;
use crate::event::{Attendee, Organizer, PartStat, Role};
use crate::keyword::{
    KW_ATTENDEE, KW_CN, KW_MAILTO, KW_ORGANIZER, KW_PARTSTAT, KW_ROLE, KW_RSVP, KW_RSVP_FALSE,
    KW_RSVP_TRUE,
};
use crate::parser::DecodeError;
use crate::text::quote_param;

/// Formats an attendee as one `ATTENDEE` content line, without line ending.
///
/// Parameters are written in the order `CN`, `ROLE`, `RSVP`, `PARTSTAT`.
///
/// ```
/// # use davcal_ical::{Attendee, Role, participant::format_attendee};
/// let attendee = Attendee {
///     display_name: Some("Alice".to_string()),
///     role: Role::Chair,
///     rsvp: true,
///     ..Attendee::new("a@b.com")
/// };
/// assert_eq!(
///     format_attendee(&attendee),
///     "ATTENDEE;CN=\"Alice\";ROLE=CHAIR;RSVP=TRUE;PARTSTAT=NEEDS-ACTION:mailto:a@b.com"
/// );
/// ```
#[must_use]
pub fn format_attendee(attendee: &Attendee) -> String {
    let mut line = String::from(KW_ATTENDEE);
    if let Some(name) = &attendee.display_name {
        push_param(&mut line, KW_CN, &quote_param(name));
    }
    push_param(&mut line, KW_ROLE, attendee.role.as_ref());
    let rsvp = if attendee.rsvp {
        KW_RSVP_TRUE
    } else {
        KW_RSVP_FALSE
    };
    push_param(&mut line, KW_RSVP, rsvp);
    push_param(&mut line, KW_PARTSTAT, PartStat::NeedsAction.as_ref());
    push_address(&mut line, &attendee.email);
    line
}

/// Formats an organizer as one `ORGANIZER` content line, without line ending.
#[must_use]
pub fn format_organizer(organizer: &Organizer) -> String {
    let mut line = String::from(KW_ORGANIZER);
    if let Some(name) = &organizer.display_name {
        push_param(&mut line, KW_CN, &quote_param(name));
    }
    push_address(&mut line, &organizer.email);
    line
}

/// Parses an `ATTENDEE` content line.
///
/// # Errors
///
/// Returns an error if the line is not an `ATTENDEE` property.
pub fn parse_attendee(line: &str) -> Result<Attendee, DecodeError> {
    match ContentLine::parse(line) {
        Some(content) if content.is(KW_ATTENDEE) => Ok(attendee_from(&content)),
        _ => Err(DecodeError::MalformedLine(line.to_string())),
    }
}

/// Parses an `ORGANIZER` content line.
///
/// # Errors
///
/// Returns an error if the line is not an `ORGANIZER` property.
pub fn parse_organizer(line: &str) -> Result<Organizer, DecodeError> {
    match ContentLine::parse(line) {
        Some(content) if content.is(KW_ORGANIZER) => Ok(organizer_from(&content)),
        _ => Err(DecodeError::MalformedLine(line.to_string())),
    }
}

pub(crate) fn attendee_from(line: &ContentLine<'_>) -> Attendee {
    Attendee {
        email: address(line.value).to_string(),
        display_name: line.param(KW_CN).map(str::to_string),
        role: line
            .param(KW_ROLE)
            .and_then(|v| v.parse().ok())
            .unwrap_or(Role::ReqParticipant),
        rsvp: line.param(KW_RSVP) == Some(KW_RSVP_TRUE),
        status: line
            .param(KW_PARTSTAT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(PartStat::NeedsAction),
    }
}

pub(crate) fn organizer_from(line: &ContentLine<'_>) -> Organizer {
    Organizer {
        email: address(line.value).to_string(),
        display_name: line.param(KW_CN).map(str::to_string),
    }
}

fn push_param(line: &mut String, name: &str, value: &str) {
    line.push(';');
    line.push_str(name);
    line.push('=');
    line.push_str(value);
}

fn push_address(line: &mut String, email: &str) {
    line.push(':');
    line.push_str(KW_MAILTO);
    line.push_str(email);
}

/// The part of a calendar user address after `mailto:`, scheme matched
/// case-insensitively. Values without the scheme are returned unchanged.
fn address(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.find(KW_MAILTO) {
        Some(i) => value.get(i + KW_MAILTO.len()..).unwrap_or_default(),
        None => value,
    }
}
