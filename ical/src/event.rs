// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Structured event records exchanged with the codec.

use jiff::Timestamp;

/// A single calendar event (the content of one `VEVENT`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Event {
    /// Globally unique identifier, stable across updates.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub uid: Option<String>,

    /// The summary of the event.
    pub title: String,

    /// Start of the event.
    pub start: Timestamp,

    /// End of the event, exclusive.
    pub end: Timestamp,

    /// Free text description.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,

    /// Free text location.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub location: Option<String>,

    /// Event status such as `CONFIRMED`, `TENTATIVE` or `CANCELLED`, passed through verbatim.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub status: Option<String>,

    /// The organizer of the event.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub organizer: Option<Organizer>,

    /// Invited participants, in serialization order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attendees: Vec<Attendee>,

    /// Creation time as reported by the server. Never written by the encoder.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub created: Option<Timestamp>,

    /// Last modification time as reported by the server. Never written by the encoder.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub last_modified: Option<Timestamp>,
}

impl Event {
    /// Creates an event with the required fields, everything else empty.
    #[must_use]
    pub fn new(title: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            uid: None,
            title: title.into(),
            start,
            end,
            description: None,
            location: None,
            status: None,
            organizer: None,
            attendees: Vec::new(),
            created: None,
            last_modified: None,
        }
    }

    /// Returns true if `term` occurs in the title, description or location,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            Some(self.title.as_str()),
            self.description.as_deref(),
            self.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

/// The organizer of an event. The role `CHAIR` is implied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Organizer {
    /// Calendar user address, without the `mailto:` scheme.
    pub email: String,

    /// Common name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub display_name: Option<String>,
}

impl Organizer {
    /// Creates an organizer with an optional common name.
    #[must_use]
    pub fn new(email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            email: email.into(),
            display_name,
        }
    }
}

/// An invited participant of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Attendee {
    /// Calendar user address, without the `mailto:` scheme.
    pub email: String,

    /// Common name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub display_name: Option<String>,

    /// Participation role.
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: Role,

    /// Whether a reply is expected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rsvp: bool,

    /// Participation status.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: PartStat,
}

impl Attendee {
    /// Creates a required participant who has not replied yet.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            role: Role::default(),
            rsvp: false,
            status: PartStat::default(),
        }
    }
}

/// Participation role (RFC 5545 section 3.2.16).
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING-KEBAB-CASE"))]
pub enum Role {
    /// Participation is required.
    #[default]
    #[strum(serialize = "REQ-PARTICIPANT")]
    ReqParticipant,

    /// Participation is optional.
    #[strum(serialize = "OPT-PARTICIPANT")]
    OptParticipant,

    /// Chair of the event.
    #[strum(serialize = "CHAIR")]
    Chair,

    /// Copied for information purposes only.
    #[strum(serialize = "NON-PARTICIPANT")]
    NonParticipant,
}

/// Participation status for an event (RFC 5545 section 3.2.12).
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING-KEBAB-CASE"))]
pub enum PartStat {
    /// No reply yet.
    #[default]
    #[strum(serialize = "NEEDS-ACTION")]
    NeedsAction,

    /// Invitation accepted.
    #[strum(serialize = "ACCEPTED")]
    Accepted,

    /// Invitation declined.
    #[strum(serialize = "DECLINED")]
    Declined,

    /// Invitation tentatively accepted.
    #[strum(serialize = "TENTATIVE")]
    Tentative,

    /// Participation delegated to someone else.
    #[strum(serialize = "DELEGATED")]
    Delegated,
}
