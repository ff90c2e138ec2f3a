// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use davcal_core::Calendar;

use crate::table::{Column, Table};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct CalendarFormatter {
    columns: Vec<CalendarColumn>,
    format: OutputFormat,
}

impl CalendarFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                CalendarColumn::Name,
                CalendarColumn::Color,
                CalendarColumn::Timezone,
                CalendarColumn::Url,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, calendars: &'a [Calendar]) -> Display<'a> {
        Display {
            calendars,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    calendars: &'a [Calendar],
    formatter: &'a CalendarFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.calendars).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table => {
                write!(f, "{}", Table::new(&self.formatter.columns, self.calendars))
            }
        }
    }
}

impl Default for CalendarFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum CalendarColumn {
    Color,
    Name,
    Timezone,
    Url,
}

impl Column<Calendar> for CalendarColumn {
    fn name(&self) -> &'static str {
        match self {
            CalendarColumn::Color => "Color",
            CalendarColumn::Name => "Name",
            CalendarColumn::Timezone => "Time Zone",
            CalendarColumn::Url => "URL",
        }
    }

    fn format(&self, data: &Calendar) -> String {
        match self {
            CalendarColumn::Color => data.color.clone().unwrap_or_default(),
            CalendarColumn::Name => data.display_name.clone(),
            CalendarColumn::Timezone => data.timezone.clone().unwrap_or_default(),
            CalendarColumn::Url => data.url.to_string(),
        }
    }
}
