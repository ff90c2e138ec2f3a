// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::Color;
use davcal_core::EventRecord;
use jiff::tz::TimeZone;

use crate::table::{Column, PaddingDirection, Table};
use crate::util::{OutputFormat, format_time_range};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(tz: TimeZone) -> Self {
        Self {
            columns: vec![
                EventColumn::TimeRange(EventColumnTimeRange { tz }),
                EventColumn::Title(EventColumnTitle),
                EventColumn::Uid(EventColumnUid),
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Adds the location and attendee columns.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.columns.insert(2, EventColumn::Location(EventColumnLocation));
            self.columns.insert(3, EventColumn::Attendees(EventColumnAttendees));
        }
        self
    }

    pub fn format<'a>(&'a self, events: &'a [EventRecord]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [EventRecord],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table => write!(f, "{}", Table::new(&self.formatter.columns, self.events)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Attendees(EventColumnAttendees),
    Location(EventColumnLocation),
    TimeRange(EventColumnTimeRange),
    Title(EventColumnTitle),
    Uid(EventColumnUid),
}

impl Column<EventRecord> for EventColumn {
    fn name(&self) -> &'static str {
        match self {
            EventColumn::Attendees(_) => "Attendees",
            EventColumn::Location(_) => "Location",
            EventColumn::TimeRange(_) => "Time Range",
            EventColumn::Title(_) => "Title",
            EventColumn::Uid(_) => "UID",
        }
    }

    fn format(&self, data: &EventRecord) -> String {
        match self {
            EventColumn::Attendees(a) => a.format(data),
            EventColumn::Location(a) => a.format(data),
            EventColumn::TimeRange(a) => a.format(data),
            EventColumn::Title(a) => a.format(data),
            EventColumn::Uid(a) => a.format(data),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Attendees(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, data: &EventRecord) -> Option<Color> {
        match self {
            EventColumn::Title(_) => match data.event.status.as_deref() {
                Some(s) if s.eq_ignore_ascii_case("CANCELLED") => Some(Color::BrightBlack),
                Some(s) if s.eq_ignore_ascii_case("TENTATIVE") => Some(Color::Yellow),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnTimeRange {
    tz: TimeZone,
}

impl EventColumnTimeRange {
    fn format(&self, record: &EventRecord) -> String {
        format_time_range(&self.tz, record.event.start, record.event.end)
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnTitle;

impl EventColumnTitle {
    fn format(&self, record: &EventRecord) -> String {
        record.event.title.clone()
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnLocation;

impl EventColumnLocation {
    fn format(&self, record: &EventRecord) -> String {
        record.event.location.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnAttendees;

impl EventColumnAttendees {
    fn format(&self, record: &EventRecord) -> String {
        record.event.attendees.len().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnUid;

impl EventColumnUid {
    fn format(&self, record: &EventRecord) -> String {
        record.uid().to_string()
    }
}
