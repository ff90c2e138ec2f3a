// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use davcal_caldav::{CalendarCollection, CollectionProps, ETag, Href};
use davcal_ical::{Attendee, Event};
use jiff::Timestamp;
use serde::{Deserialize, Deserializer};

/// A calendar collection, addressed by its display name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    /// The display name, used as lookup key.
    pub display_name: String,

    /// The collection path on the server.
    pub url: Href,

    /// The color, as `#RRGGBB[AA]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// The IANA time zone identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Free text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<CalendarCollection> for Calendar {
    fn from(collection: CalendarCollection) -> Self {
        Self {
            display_name: collection.display_name.unwrap_or_default(),
            url: collection.href,
            color: collection.color,
            timezone: collection.timezone,
            description: collection.description,
        }
    }
}

/// Optional properties of a new calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CalendarOptions {
    /// The color, as `#RRGGBB[AA]`.
    pub color: Option<String>,

    /// The IANA time zone identifier.
    pub timezone: Option<String>,

    /// Free text description.
    pub description: Option<String>,
}

impl CalendarOptions {
    pub(crate) fn into_props(self, display_name: &str) -> CollectionProps {
        CollectionProps {
            display_name: display_name.to_string(),
            description: self.description,
            color: self.color,
            timezone: self.timezone,
        }
    }
}

/// An event together with where it is stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// The event.
    #[serde(flatten)]
    pub event: Event,

    /// The object path on the server.
    pub url: Href,

    /// The entity tag, changes on every update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<ETag>,
}

impl EventRecord {
    /// The UID of the event, empty if the server object has none.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.event.uid.as_deref().unwrap_or_default()
    }
}

/// Input for creating an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    /// The summary of the event.
    pub title: String,

    /// Start of the event.
    pub start: Timestamp,

    /// End of the event, must be after the start.
    pub end: Timestamp,

    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Free text location.
    #[serde(default)]
    pub location: Option<String>,

    /// Event status such as `CONFIRMED`.
    #[serde(default)]
    pub status: Option<String>,

    /// Invited participants.
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

impl EventInput {
    /// Creates an input with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            description: None,
            location: None,
            status: None,
            attendees: Vec::new(),
        }
    }

    pub(crate) fn into_event(self) -> Event {
        let mut event = Event::new(self.title, self.start, self.end);
        event.description = self.description;
        event.location = self.location;
        event.status = self.status;
        event.attendees = self.attendees;
        event
    }
}

/// Patch for an event, allowing partial updates.
///
/// Fields left as `None` keep the stored value. For the optional text fields,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    /// The summary of the event.
    #[serde(default)]
    pub title: Option<String>,

    /// Start of the event.
    #[serde(default)]
    pub start: Option<Timestamp>,

    /// End of the event.
    #[serde(default)]
    pub end: Option<Timestamp>,

    /// Free text description.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    /// Free text location.
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,

    /// Event status.
    #[serde(default, deserialize_with = "double_option")]
    pub status: Option<Option<String>>,

    /// Replacement attendee list.
    #[serde(default)]
    pub attendees: Option<Vec<Attendee>>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.status.is_none()
            && self.attendees.is_none()
    }

    /// Applies the patch to an event, modifying it in place.
    ///
    /// UID, organizer and server timestamps are never touched.
    pub fn apply_to<'a>(&self, e: &'a mut Event) -> &'a mut Event {
        if let Some(title) = &self.title {
            e.title.clone_from(title);
        }
        if let Some(start) = self.start {
            e.start = start;
        }
        if let Some(end) = self.end {
            e.end = end;
        }
        if let Some(description) = &self.description {
            e.description.clone_from(description);
        }
        if let Some(location) = &self.location {
            e.location.clone_from(location);
        }
        if let Some(status) = &self.status {
            e.status.clone_from(status);
        }
        if let Some(attendees) = &self.attendees {
            e.attendees.clone_from(attendees);
        }
        e
    }
}

/// Outcome of a delete operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Deleted {
    /// Always true, failures are reported as errors.
    pub success: bool,

    /// The UID of the deleted event; absent for calendars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl Deleted {
    pub(crate) const fn calendar() -> Self {
        Self {
            success: true,
            uid: None,
        }
    }

    pub(crate) fn event(uid: &str) -> Self {
        Self {
            success: true,
            uid: Some(uid.to_string()),
        }
    }
}

/// Distinguishes an explicit `null` (clear) from an absent field (keep).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
