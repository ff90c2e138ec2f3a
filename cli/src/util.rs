// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use davcal_core::Attendee;
use jiff::{Timestamp, Zoned, civil, tz::TimeZone};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

const DATETIME_FORMATS: &str =
    "Expected an RFC 3339 timestamp, YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM";

/// Parses a point in time given on the command line.
///
/// Timestamps with an offset are taken as is; dates and times without one are
/// local to the time zone of `now`, and a bare time is on the day of `now`.
pub fn parse_datetime(now: &Zoned, s: &str) -> Result<Timestamp, Box<dyn Error>> {
    let s = s.trim();
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Ok(ts);
    }

    let tz = now.time_zone();
    if let Ok(dt) = civil::DateTime::strptime("%Y-%m-%d %H:%M", s) {
        local(tz, dt)
    } else if let Ok(date) = civil::Date::strptime("%Y-%m-%d", s) {
        local(tz, date.to_datetime(civil::Time::midnight()))
    } else if let Ok(time) = civil::Time::strptime("%H:%M", s) {
        local(tz, now.date().to_datetime(time))
    } else {
        Err(format!("Invalid date format {s:?}. {DATETIME_FORMATS}").into())
    }
}

/// Parses the end of an event that starts at `start`.
///
/// A bare time is on the day of the start, or the day after if that time is
/// not later than the start.
pub fn parse_end(now: &Zoned, start: Timestamp, s: &str) -> Result<Timestamp, Box<dyn Error>> {
    let Ok(time) = civil::Time::strptime("%H:%M", s.trim()) else {
        return parse_datetime(now, s);
    };

    let tz = now.time_zone();
    let day = start.to_zoned(tz.clone()).date();
    let end = local(tz, day.to_datetime(time))?;
    if end > start {
        Ok(end)
    } else {
        let next = day.tomorrow()?;
        local(tz, next.to_datetime(time))
    }
}

/// Start of the day of `now`.
pub fn start_of_today(now: &Zoned) -> Result<Timestamp, Box<dyn Error>> {
    Ok(now.start_of_day()?.timestamp())
}

fn local(tz: &TimeZone, dt: civil::DateTime) -> Result<Timestamp, Box<dyn Error>> {
    Ok(dt.to_zoned(tz.clone())?.timestamp())
}

/// Formats a timestamp as local `YYYY-MM-DD HH:MM`.
pub fn format_datetime(tz: &TimeZone, ts: Timestamp) -> String {
    ts.to_zoned(tz.clone()).strftime("%Y-%m-%d %H:%M").to_string()
}

/// Formats a span, leaving out the end date if it is the start date.
pub fn format_time_range(tz: &TimeZone, start: Timestamp, end: Timestamp) -> String {
    let same_day = start.to_zoned(tz.clone()).date() == end.to_zoned(tz.clone()).date();
    match same_day {
        true => format!(
            "{}~{}",
            format_datetime(tz, start),
            end.to_zoned(tz.clone()).strftime("%H:%M")
        ),
        false => format!("{}~{}", format_datetime(tz, start), format_datetime(tz, end)),
    }
}

/// Parses an attendee given as `address` or `Name <address>`.
pub fn parse_attendee(s: &str) -> Result<Attendee, String> {
    let s = s.trim();
    let (name, email) = match s.strip_suffix('>').and_then(|rest| rest.rsplit_once('<')) {
        Some((name, email)) => (name.trim(), email.trim()),
        None => ("", s),
    };

    if email.is_empty() || email.contains(char::is_whitespace) {
        return Err(format!("Invalid attendee {s:?}, expected ADDRESS or \"NAME <ADDRESS>\""));
    }

    let mut attendee = Attendee::new(email);
    attendee.display_name = (!name.is_empty()).then(|| name.trim_matches('"').to_string());
    Ok(attendee)
}
