// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) parser for the first `VEVENT` of a calendar object.

use jiff::{SignedDuration, Timestamp};

use crate::content_line::{ContentLine, unfold};
use crate::datetime::{ParsedTime, parse_basic};
use crate::duration::parse_duration;
use crate::event::{Attendee, Event, Organizer};
use crate::keyword::{
    KW_ATTENDEE, KW_BEGIN, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTART, KW_DURATION,
    KW_END, KW_LAST_MODIFIED, KW_LOCATION, KW_ORGANIZER, KW_STATUS, KW_SUMMARY, KW_UID, KW_VEVENT,
};
use crate::participant::{attendee_from, organizer_from};
use crate::text::unescape_text;

/// Errors that can occur while decoding an iCalendar object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The text contains no `BEGIN:VEVENT`.
    #[error("no VEVENT component found")]
    NoEvent,

    /// A `VEVENT` was opened but never closed.
    #[error("VEVENT is not terminated by END:VEVENT")]
    Unterminated,

    /// A required property is absent.
    #[error("missing required property {0}")]
    MissingProperty(&'static str),

    /// A line inside the event has no `NAME:VALUE` structure.
    #[error("malformed content line: {0}")]
    MalformedLine(String),

    /// A date or date-time value could not be parsed.
    #[error("invalid date-time for {property}: {value}")]
    InvalidDateTime {
        /// Property carrying the value.
        property: &'static str,
        /// The offending value.
        value: String,
    },

    /// A `DURATION` value could not be parsed.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}

/// Decodes the first `VEVENT` found in `text`.
///
/// Lines may end in CRLF or LF and folded lines are joined first. Anything
/// outside the event, nested components such as `VALARM`, and unknown
/// properties are ignored.
///
/// # Errors
///
/// Returns an error if there is no complete `VEVENT`, if `DTSTART` is missing,
/// or if a line or date-time value inside the event is malformed.
pub fn decode(text: &str) -> Result<Event, DecodeError> {
    let lines = unfold(text);
    let mut lines = lines.iter().map(String::as_str);

    // Skip to the event
    lines
        .by_ref()
        .find(|line| is_marker(line, KW_BEGIN, KW_VEVENT))
        .ok_or(DecodeError::NoEvent)?;

    let mut builder = EventBuilder::default();
    let mut depth = 0usize;
    for line in lines {
        let content = ContentLine::parse(line)
            .ok_or_else(|| DecodeError::MalformedLine(line.to_string()))?;

        if content.is(KW_BEGIN) {
            depth += 1;
        } else if content.is(KW_END) {
            if depth == 0 {
                if content.value.trim().eq_ignore_ascii_case(KW_VEVENT) {
                    return builder.build();
                }
                return Err(DecodeError::Unterminated);
            }
            depth -= 1;
        } else if depth == 0 {
            builder.property(&content)?;
        }
    }

    Err(DecodeError::Unterminated)
}

fn is_marker(line: &str, name: &str, value: &str) -> bool {
    ContentLine::parse(line)
        .is_some_and(|c| c.is(name) && c.value.trim().eq_ignore_ascii_case(value))
}

#[derive(Debug, Default)]
struct EventBuilder {
    uid: Option<String>,
    title: Option<String>,
    start: Option<ParsedTime>,
    end: Option<Timestamp>,
    duration: Option<SignedDuration>,
    description: Option<String>,
    location: Option<String>,
    status: Option<String>,
    organizer: Option<Organizer>,
    attendees: Vec<Attendee>,
    created: Option<Timestamp>,
    last_modified: Option<Timestamp>,
}

impl EventBuilder {
    fn property(&mut self, line: &ContentLine<'_>) -> Result<(), DecodeError> {
        let name = line.name.to_ascii_uppercase();
        match name.as_str() {
            KW_UID => self.uid = Some(line.value.to_string()),
            KW_SUMMARY => self.title = Some(unescape_text(line.value)),
            KW_DESCRIPTION => self.description = Some(unescape_text(line.value)),
            KW_LOCATION => self.location = Some(unescape_text(line.value)),
            KW_STATUS => self.status = Some(unescape_text(line.value)),
            KW_DTSTART => self.start = Some(time(KW_DTSTART, line.value)?),
            KW_DTEND => self.end = Some(time(KW_DTEND, line.value)?.timestamp),
            KW_DURATION => {
                let duration = parse_duration(line.value)
                    .ok_or_else(|| DecodeError::InvalidDuration(line.value.to_string()))?;
                self.duration = Some(duration);
            }
            KW_CREATED => self.created = Some(time(KW_CREATED, line.value)?.timestamp),
            KW_LAST_MODIFIED => {
                self.last_modified = Some(time(KW_LAST_MODIFIED, line.value)?.timestamp);
            }
            KW_ORGANIZER => self.organizer = Some(organizer_from(line)),
            KW_ATTENDEE => self.attendees.push(attendee_from(line)),
            _ => {}
        }
        Ok(())
    }

    fn build(self) -> Result<Event, DecodeError> {
        let start = self.start.ok_or(DecodeError::MissingProperty(KW_DTSTART))?;

        // RFC 5545 section 3.6.1: without DTEND or DURATION, a DATE start
        // lasts one day and a DATE-TIME start is an instant
        let duration = match self.duration {
            Some(duration) => Some(duration),
            None if start.date_only => Some(SignedDuration::from_hours(24)),
            None => None,
        };
        let end = match (self.end, duration) {
            (Some(end), _) => end,
            (None, Some(duration)) => start.timestamp.checked_add(duration).map_err(|_| {
                DecodeError::InvalidDateTime {
                    property: KW_DTEND,
                    value: start.timestamp.to_string(),
                }
            })?,
            (None, None) => start.timestamp,
        };

        Ok(Event {
            uid: self.uid,
            title: self.title.unwrap_or_default(),
            start: start.timestamp,
            end,
            description: self.description,
            location: self.location,
            status: self.status,
            organizer: self.organizer,
            attendees: self.attendees,
            created: self.created,
            last_modified: self.last_modified,
        })
    }
}

fn time(property: &'static str, value: &str) -> Result<ParsedTime, DecodeError> {
    parse_basic(value).ok_or_else(|| DecodeError::InvalidDateTime {
        property,
        value: value.to_string(),
    })
}
