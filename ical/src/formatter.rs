// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter.
//!
//! Writes a single event wrapped in a `VCALENDAR`. Property order is fixed so
//! the output is byte-identical for identical input.
//!
//! # Example
//!
//! ```
//! use davcal_ical::{Event, encode};
//!
//! let start = "2025-01-01T10:00:00Z".parse().unwrap();
//! let end = "2025-01-01T11:00:00Z".parse().unwrap();
//! let event = Event::new("Team Meeting", start, end);
//!
//! let ics = encode(&event, start);
//! assert!(ics.contains("SUMMARY:Team Meeting\r\n"));
//! ```

use jiff::Timestamp;

use crate::datetime::format_utc;
use crate::event::Event;
use crate::keyword::{
    KW_BEGIN, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_END, KW_LOCATION, KW_PRODID,
    KW_STATUS, KW_SUMMARY, KW_UID, KW_VCALENDAR, KW_VERSION, KW_VERSION_2_0, KW_VEVENT,
};
use crate::participant::{format_attendee, format_organizer};
use crate::text::escape_text;

/// Product identifier written into every calendar.
pub const PRODID: &str = "-//davcal//davcal-ical//EN";

/// Encodes an event as an iCalendar object.
///
/// `dtstamp` is written as the `DTSTAMP` property; pass the current time when
/// sending to a server. `created` and `last_modified` are owned by the server
/// and never written.
#[must_use]
pub fn encode(event: &Event, dtstamp: Timestamp) -> String {
    let mut f = Formatter::default();

    f.line(KW_BEGIN, KW_VCALENDAR);
    f.line(KW_VERSION, KW_VERSION_2_0);
    f.line(KW_PRODID, PRODID);
    f.line(KW_BEGIN, KW_VEVENT);

    if let Some(uid) = &event.uid {
        f.line(KW_UID, uid);
    }
    f.line(KW_DTSTAMP, &format_utc(dtstamp));
    f.text(KW_SUMMARY, &event.title);
    f.line(KW_DTSTART, &format_utc(event.start));
    f.line(KW_DTEND, &format_utc(event.end));
    if let Some(description) = &event.description {
        f.text(KW_DESCRIPTION, description);
    }
    if let Some(location) = &event.location {
        f.text(KW_LOCATION, location);
    }
    if let Some(status) = &event.status {
        f.text(KW_STATUS, status);
    }
    if let Some(organizer) = &event.organizer {
        f.raw(&format_organizer(organizer));
    }
    for attendee in &event.attendees {
        f.raw(&format_attendee(attendee));
    }

    f.line(KW_END, KW_VEVENT);
    f.line(KW_END, KW_VCALENDAR);
    f.finish()
}

/// Accumulates CRLF-terminated content lines.
#[derive(Debug, Default)]
struct Formatter {
    buf: String,
}

impl Formatter {
    fn line(&mut self, name: &str, value: &str) {
        self.buf.push_str(name);
        self.buf.push(':');
        self.buf.push_str(value);
        self.buf.push_str("\r\n");
    }

    fn text(&mut self, name: &str, value: &str) {
        self.line(name, &escape_text(value));
    }

    fn raw(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push_str("\r\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}
