// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Basic-format DATE and DATE-TIME values.
//!
//! Only UTC is supported: values are always written as `YYYYMMDDTHHMMSSZ`, and
//! floating or zone-qualified values are read as if they were UTC.

use jiff::Timestamp;
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;

/// Formats a timestamp as a UTC DATE-TIME, dropping sub-second precision.
#[must_use]
pub fn format_utc(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y%m%dT%H%M%SZ").to_string()
}

/// A parsed DATE or DATE-TIME value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    /// The instant, midnight UTC for DATE values.
    pub timestamp: Timestamp,
    /// Whether the value was a DATE without a time part.
    pub date_only: bool,
}

/// Parses `YYYYMMDD`, `YYYYMMDDTHHMMSS` or `YYYYMMDDTHHMMSSZ`.
///
/// Returns `None` if the value is not in one of these forms or does not
/// denote a valid calendar date and time.
#[must_use]
pub fn parse_basic(value: &str) -> Option<ParsedTime> {
    let value = value.trim();
    if !value.is_ascii() {
        return None;
    }

    let date = parse_date(value.get(0..8)?)?;
    let (time, date_only) = match value.len() {
        8 => (Time::midnight(), true),
        15 | 16 => {
            if value.get(8..9)? != "T" || (value.len() == 16 && !value.ends_with('Z')) {
                return None;
            }
            (parse_time(value.get(9..15)?)?, false)
        }
        _ => return None,
    };

    let timestamp = TimeZone::UTC
        .to_timestamp(DateTime::from_parts(date, time))
        .ok()?;
    Some(ParsedTime {
        timestamp,
        date_only,
    })
}

fn parse_date(s: &str) -> Option<Date> {
    let year = number(s.get(0..4)?)?;
    let month = number(s.get(4..6)?)?;
    let day = number(s.get(6..8)?)?;
    Date::new(year, i8::try_from(month).ok()?, i8::try_from(day).ok()?).ok()
}

fn parse_time(s: &str) -> Option<Time> {
    let hour = number(s.get(0..2)?)?;
    let minute = number(s.get(2..4)?)?;
    let second = number(s.get(4..6)?)?;
    Time::new(
        i8::try_from(hour).ok()?,
        i8::try_from(minute).ok()?,
        i8::try_from(second).ok()?,
        0,
    )
    .ok()
}

fn number(s: &str) -> Option<i16> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
