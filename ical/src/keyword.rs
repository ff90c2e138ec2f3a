// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";

// Section 3.2 - Property Parameters
pub const KW_CN: &str = "CN";
pub const KW_PARTSTAT: &str = "PARTSTAT";
pub const KW_ROLE: &str = "ROLE";
pub const KW_RSVP: &str = "RSVP";
pub const KW_RSVP_TRUE: &str = "TRUE";
pub const KW_RSVP_FALSE: &str = "FALSE";

// Section 3.7 - Calendar Properties
pub const KW_PRODID: &str = "PRODID";
pub const KW_VERSION: &str = "VERSION";
pub const KW_VERSION_2_0: &str = "2.0";

// Section 3.8 - Component Properties
pub const KW_ATTENDEE: &str = "ATTENDEE";
pub const KW_CREATED: &str = "CREATED";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DTSTAMP: &str = "DTSTAMP";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DURATION: &str = "DURATION";
pub const KW_LAST_MODIFIED: &str = "LAST-MODIFIED";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_ORGANIZER: &str = "ORGANIZER";
pub const KW_STATUS: &str = "STATUS";
pub const KW_SUMMARY: &str = "SUMMARY";
pub const KW_UID: &str = "UID";

/// URI scheme of calendar user addresses.
pub const KW_MAILTO: &str = "mailto:";
