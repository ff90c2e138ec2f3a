// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use davcal_core::{CoreConfig, Event, EventInput};
use jiff::Timestamp;

/// Parses an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics if `s` is not a valid timestamp.
#[must_use]
pub fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

/// Configuration with a known organizer and UID namespace.
#[must_use]
pub fn test_config() -> CoreConfig {
    CoreConfig {
        uid_namespace: "davcal-test".to_string(),
        organizer_email: Some("alice@example.com".to_string()),
        organizer_name: Some("Alice".to_string()),
        etag_precondition: true,
    }
}

/// A one hour event on 2025-06-02 starting at `hour` UTC.
#[must_use]
pub fn test_input(title: &str, hour: i8) -> EventInput {
    let start = ts(&format!("2025-06-02T{hour:02}:00:00Z"));
    let end = ts(&format!("2025-06-02T{hour:02}:59:00Z"));
    EventInput::new(title, start, end)
}

/// Calendar data for an event stored by another client.
#[must_use]
pub fn event_ics(uid: &str, title: &str, start: &str, end: &str) -> String {
    let mut event = Event::new(title, ts(start), ts(end));
    event.uid = Some(uid.to_string());
    davcal_ical::encode(&event, ts("2025-01-01T00:00:00Z"))
}
