// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use davcal_core::{Calendar, CalendarOptions, Orchestrator, Transport};

use crate::arg::{CalendarArgs, CommonArgs};
use crate::calendar_formatter::CalendarFormatter;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdCalendarNew {
    pub name: String,
    pub color: Option<String>,
    pub timezone: Option<String>,
    pub description: Option<String>,

    pub output_format: OutputFormat,
}

impl CmdCalendarNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a calendar")
            .arg(CalendarArgs::name())
            .arg(CalendarArgs::color())
            .arg(CalendarArgs::timezone())
            .arg(CalendarArgs::description())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: CalendarArgs::get_name(matches),
            color: matches.get_one("color").cloned(),
            timezone: matches.get_one("timezone").cloned(),
            description: matches.get_one("description").cloned(),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating calendar...");
        let options = CalendarOptions {
            color: self.color,
            timezone: self.timezone,
            description: self.description,
        };
        let calendar = orchestrator.create_calendar(&self.name, options).await?;
        print_calendars(&[calendar], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCalendarDelete {
    pub name: String,
}

impl CmdCalendarDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a calendar with all its events")
            .arg(CalendarArgs::name())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: CalendarArgs::get_name(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting calendar...");
        orchestrator.delete_calendar(&self.name).await?;
        println!("{} calendar {}", "Deleted".green(), self.name.bold());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCalendarList {
    pub output_format: OutputFormat,
}

impl CmdCalendarList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List calendars")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing calendars...");
        let calendars = orchestrator.list_calendars().await?;
        print_calendars(&calendars, self.output_format);
        Ok(())
    }
}

fn print_calendars(calendars: &[Calendar], output_format: OutputFormat) {
    let formatter = CalendarFormatter::new().with_output_format(output_format);
    print!("{}", formatter.format(calendars));
}
