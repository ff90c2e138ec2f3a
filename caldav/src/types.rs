// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

/// Calendar resource href (path).
///
/// A `Href` represents the path to a calendar resource on a `CalDAV` server,
/// such as `/calendars/user/event1.ics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Href(String);

impl Href {
    /// Creates a new `Href` from a string.
    #[must_use]
    pub const fn new(href: String) -> Self {
        Self(href)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a path segment, inserting a slash if needed.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let base = self.0.trim_end_matches('/');
        Self(format!("{base}/{}", segment.trim_start_matches('/')))
    }
}

impl Deref for Href {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Href {
    fn from(href: String) -> Self {
        Self(href)
    }
}

impl From<&str> for Href {
    fn from(href: &str) -> Self {
        Self(href.to_string())
    }
}

/// Entity tag for change detection.
///
/// An `ETag` represents an entity tag returned by the `CalDAV` server,
/// used for optimistic concurrency control and change detection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ETag(String);

impl ETag {
    /// Creates a new `ETag` from a string.
    #[must_use]
    pub const fn new(etag: String) -> Self {
        Self(etag)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ETag {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ETag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ETag {
    fn from(etag: String) -> Self {
        Self(etag)
    }
}

impl From<&str> for ETag {
    fn from(etag: &str) -> Self {
        Self(etag.to_string())
    }
}

/// A calendar object as returned by the server.
///
/// Objects come back in two shapes: a `PUT` answers with the object inline,
/// while a `REPORT` yields the `WebDAV` property bag of each resource. Use
/// [`RawCalendarObject::normalize`] to get a uniform view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCalendarObject {
    /// Object with its data in hand.
    Inline {
        /// The href of the object.
        url: Href,
        /// The entity tag, if the server sent one.
        etag: Option<ETag>,
        /// The iCalendar text.
        data: Option<String>,
    },
    /// Object described by `WebDAV` properties.
    PropBag {
        /// The href of the object.
        href: Href,
        /// The `DAV:getetag` property.
        getetag: Option<ETag>,
        /// The `C:calendar-data` property.
        calendar_data: Option<String>,
    },
}

impl RawCalendarObject {
    /// The href of the object, whatever its shape.
    #[must_use]
    pub fn href(&self) -> &Href {
        match self {
            Self::Inline { url, .. } => url,
            Self::PropBag { href, .. } => href,
        }
    }

    /// Converts to a [`CalendarObject`]. Returns `None` when the object
    /// carries no (or empty) calendar data.
    #[must_use]
    pub fn normalize(self) -> Option<CalendarObject> {
        let (url, etag, text) = match self {
            Self::Inline { url, etag, data } => (url, etag, data?),
            Self::PropBag {
                href,
                getetag,
                calendar_data,
            } => (href, getetag, calendar_data?),
        };

        if text.trim().is_empty() {
            return None;
        }
        Some(CalendarObject { url, etag, text })
    }
}

/// A calendar object with its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarObject {
    /// The href of the object.
    pub url: Href,
    /// The entity tag, if known.
    pub etag: Option<ETag>,
    /// The iCalendar text.
    pub text: String,
}

/// Calendar collection metadata.
///
/// Represents a calendar collection on a `CalDAV` server, containing
/// metadata about the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCollection {
    /// The href of the calendar collection.
    pub href: Href,
    /// The display name of the calendar.
    pub display_name: Option<String>,
    /// The description of the calendar.
    pub description: Option<String>,
    /// The color of the calendar, as `#RRGGBB[AA]`.
    pub color: Option<String>,
    /// The IANA time zone identifier of the calendar.
    pub timezone: Option<String>,
    /// Supported component types (VEVENT, VTODO, etc.).
    pub supported_components: Vec<String>,
}

impl CalendarCollection {
    /// Creates a new `CalendarCollection`.
    #[must_use]
    pub fn new(href: Href) -> Self {
        Self {
            href,
            display_name: None,
            description: None,
            color: None,
            timezone: None,
            supported_components: Vec::new(),
        }
    }
}

/// Properties set on a new calendar collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionProps {
    /// The display name.
    pub display_name: String,
    /// The description.
    pub description: Option<String>,
    /// The color, as `#RRGGBB[AA]`.
    pub color: Option<String>,
    /// The IANA time zone identifier.
    pub timezone: Option<String>,
}
