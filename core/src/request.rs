// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed requests and responses, one variant per operation.
//!
//! Requests deserialize from flat objects tagged with `resource` and
//! `operation`:
//!
//! ```
//! # use davcal_core::{EventRequest, Request};
//! let json = r#"{"resource": "event", "operation": "get", "calendar": "Work", "uid": "abc"}"#;
//! let request: Request = serde_json::from_str(json).unwrap();
//! assert!(matches!(request, Request::Event(EventRequest::Get { .. })));
//! ```

use jiff::Timestamp;

use crate::{Calendar, CalendarOptions, Deleted, EventInput, EventPatch, EventRecord};

/// A request for one operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "resource", rename_all = "camelCase")]
pub enum Request {
    /// An operation on calendars.
    Calendar(CalendarRequest),
    /// An operation on events.
    Event(EventRequest),
}

impl Request {
    /// Name of the operation, such as `event.create`.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Calendar(CalendarRequest::Create { .. }) => "calendar.create",
            Self::Calendar(CalendarRequest::Delete { .. }) => "calendar.delete",
            Self::Calendar(CalendarRequest::List) => "calendar.list",
            Self::Event(EventRequest::Create { .. }) => "event.create",
            Self::Event(EventRequest::Get { .. }) => "event.get",
            Self::Event(EventRequest::List { .. }) => "event.list",
            Self::Event(EventRequest::Search { .. }) => "event.search",
            Self::Event(EventRequest::Update { .. }) => "event.update",
            Self::Event(EventRequest::Delete { .. }) => "event.delete",
        }
    }
}

/// Operations on calendars.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum CalendarRequest {
    /// Create a calendar.
    Create {
        /// Display name of the new calendar.
        name: String,
        /// Optional properties.
        #[serde(flatten)]
        options: CalendarOptions,
    },
    /// Delete a calendar by name.
    Delete {
        /// Display name of the calendar.
        name: String,
    },
    /// List all calendars.
    List,
}

/// Operations on the events of a calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum EventRequest {
    /// Create an event.
    Create {
        /// Display name of the calendar.
        calendar: String,
        /// The event to create.
        #[serde(flatten)]
        input: EventInput,
    },
    /// Get an event by UID.
    Get {
        /// Display name of the calendar.
        calendar: String,
        /// UID of the event.
        uid: String,
    },
    /// List the events in a time range.
    List {
        /// Display name of the calendar.
        calendar: String,
        /// Start of the range, inclusive.
        start: Timestamp,
        /// End of the range, exclusive.
        end: Timestamp,
    },
    /// Search the events in a time range.
    Search {
        /// Display name of the calendar.
        calendar: String,
        /// Text to look for in title, description and location.
        term: String,
        /// Start of the range, inclusive.
        start: Timestamp,
        /// End of the range, exclusive.
        end: Timestamp,
    },
    /// Update an event by UID.
    Update {
        /// Display name of the calendar.
        calendar: String,
        /// UID of the event.
        uid: String,
        /// The fields to change.
        #[serde(flatten)]
        patch: EventPatch,
    },
    /// Delete an event by UID.
    Delete {
        /// Display name of the calendar.
        calendar: String,
        /// UID of the event.
        uid: String,
    },
}

/// The result of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Response {
    /// A single calendar.
    Calendar(Calendar),
    /// A list of calendars.
    Calendars(Vec<Calendar>),
    /// A single event.
    Event(EventRecord),
    /// A list of events.
    Events(Vec<EventRecord>),
    /// Something was deleted.
    Deleted(Deleted),
}
