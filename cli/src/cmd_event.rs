// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use davcal_core::{Attendee, EventInput, EventPatch, EventRecord, Orchestrator, Transport};
use jiff::{SignedDuration, Timestamp, Zoned};

use crate::arg::{CalendarArgs, CommonArgs, EventArgs, EventStatus};
use crate::event_formatter::EventFormatter;
use crate::util::{OutputFormat, parse_datetime, parse_end, start_of_today};

/// Length of an event created without an end.
const DEFAULT_DURATION: SignedDuration = SignedDuration::from_hours(1);

/// Days listed or searched when no end is given.
const DEFAULT_RANGE_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub calendar: String,
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    pub attendees: Vec<Attendee>,
    pub rsvp: bool,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(EventArgs::title(true))
            .arg(CalendarArgs::calendar())
            .arg(EventArgs::start(true))
            .arg(EventArgs::end(false))
            .arg(EventArgs::description())
            .arg(EventArgs::location())
            .arg(EventArgs::status())
            .arg(EventArgs::attendee())
            .arg(EventArgs::rsvp())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            calendar: CalendarArgs::get_calendar(matches),
            title: EventArgs::get_title(matches).unwrap_or_default(),
            start: EventArgs::get_start(matches).unwrap_or_default(),
            end: EventArgs::get_end(matches),
            description: EventArgs::get_description(matches),
            location: EventArgs::get_location(matches),
            status: EventArgs::get_status(matches),
            attendees: EventArgs::get_attendees(matches).unwrap_or_default(),
            rsvp: EventArgs::get_rsvp(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let input = self.input(&Zoned::now())?;
        let record = orchestrator.create_event(&self.calendar, input).await?;
        print_events(&[record], self.output_format, self.verbose);
        Ok(())
    }

    pub fn input(&self, now: &Zoned) -> Result<EventInput, Box<dyn Error>> {
        let start = parse_datetime(now, &self.start)?;
        let end = match &self.end {
            Some(end) => parse_end(now, start, end)?,
            None => start.checked_add(DEFAULT_DURATION)?,
        };

        let mut input = EventInput::new(self.title.clone(), start, end);
        input.description = non_empty(self.description.as_ref());
        input.location = non_empty(self.location.as_ref());
        input.status = self.status.map(|s| s.as_str().to_string());
        input.attendees = with_rsvp(self.attendees.clone(), self.rsvp);
        Ok(input)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventGet {
    pub calendar: String,
    pub uid: String,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventGet {
    pub const NAME: &str = "get";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("show")
            .about("Show an event")
            .arg(EventArgs::uid())
            .arg(CalendarArgs::calendar())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            calendar: CalendarArgs::get_calendar(matches),
            uid: EventArgs::get_uid(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "getting event...");
        let record = orchestrator.get_event(&self.calendar, &self.uid).await?;
        print_events(&[record], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub calendar: String,
    pub start: Option<String>,
    pub end: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the events in a time range, the coming week by default")
            .arg(CalendarArgs::calendar())
            .arg(EventArgs::start(false))
            .arg(EventArgs::end(false))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            calendar: CalendarArgs::get_calendar(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let (start, end) = parse_range(&Zoned::now(), self.start.as_ref(), self.end.as_ref())?;
        let events = orchestrator.list_events(&self.calendar, start, end).await?;
        print_events(&events, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventSearch {
    pub calendar: String,
    pub term: String,
    pub start: Option<String>,
    pub end: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventSearch {
    pub const NAME: &str = "search";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("find")
            .about("Search the events in a time range, the coming week by default")
            .arg(EventArgs::term())
            .arg(CalendarArgs::calendar())
            .arg(EventArgs::start(false))
            .arg(EventArgs::end(false))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            calendar: CalendarArgs::get_calendar(matches),
            term: EventArgs::get_term(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "searching events...");
        let (start, end) = parse_range(&Zoned::now(), self.start.as_ref(), self.end.as_ref())?;
        let events = orchestrator
            .search_events(&self.calendar, &self.term, start, end)
            .await?;
        print_events(&events, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub calendar: String,
    pub uid: String,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    pub attendees: Option<Vec<Attendee>>,
    pub rsvp: bool,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Change some fields of an event")
            .arg(EventArgs::uid())
            .arg(CalendarArgs::calendar())
            .arg(EventArgs::title(false))
            .arg(EventArgs::start(false))
            .arg(EventArgs::end(false))
            .arg(EventArgs::description())
            .arg(EventArgs::location())
            .arg(EventArgs::status())
            .arg(EventArgs::attendee().help("Replaces all attendees, repeatable"))
            .arg(EventArgs::rsvp())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            calendar: CalendarArgs::get_calendar(matches),
            uid: EventArgs::get_uid(matches),
            title: EventArgs::get_title(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),
            description: EventArgs::get_description(matches),
            location: EventArgs::get_location(matches),
            status: EventArgs::get_status(matches),
            attendees: EventArgs::get_attendees(matches),
            rsvp: EventArgs::get_rsvp(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let patch = self.patch(&Zoned::now())?;
        if patch.is_empty() {
            return Err("Nothing to change, pass at least one field".into());
        }

        let record = orchestrator
            .update_event(&self.calendar, &self.uid, patch)
            .await?;
        print_events(&[record], self.output_format, self.verbose);
        Ok(())
    }

    /// The fields to change; an empty text clears the field.
    pub fn patch(&self, now: &Zoned) -> Result<EventPatch, Box<dyn Error>> {
        let start = self
            .start
            .as_ref()
            .map(|s| parse_datetime(now, s))
            .transpose()?;
        let end = match (&self.end, start) {
            (Some(end), Some(start)) => Some(parse_end(now, start, end)?),
            (Some(end), None) => Some(parse_datetime(now, end)?),
            (None, _) => None,
        };

        Ok(EventPatch {
            title: self.title.clone(),
            start,
            end,
            description: self.description.as_ref().map(|s| non_empty(Some(s))),
            location: self.location.as_ref().map(|s| non_empty(Some(s))),
            status: self.status.map(|s| Some(s.as_str().to_string())),
            attendees: self
                .attendees
                .clone()
                .map(|attendees| with_rsvp(attendees, self.rsvp)),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub calendar: String,
    pub uid: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(EventArgs::uid())
            .arg(CalendarArgs::calendar())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            calendar: CalendarArgs::get_calendar(matches),
            uid: EventArgs::get_uid(matches),
        }
    }

    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        orchestrator.delete_event(&self.calendar, &self.uid).await?;
        println!("{} event {}", "Deleted".green(), self.uid.bold());
        Ok(())
    }
}

/// Resolves the range of a list or search, starting today by default.
fn parse_range(
    now: &Zoned,
    start: Option<&String>,
    end: Option<&String>,
) -> Result<(Timestamp, Timestamp), Box<dyn Error>> {
    let start = match start {
        Some(start) => parse_datetime(now, start)?,
        None => start_of_today(now)?,
    };
    let end = match end {
        Some(end) => parse_end(now, start, end)?,
        None => start.checked_add(SignedDuration::from_hours(24 * DEFAULT_RANGE_DAYS))?,
    };
    Ok((start, end))
}

fn non_empty(s: Option<&String>) -> Option<String> {
    s.filter(|s| !s.is_empty()).cloned()
}

fn with_rsvp(mut attendees: Vec<Attendee>, rsvp: bool) -> Vec<Attendee> {
    if rsvp {
        for attendee in &mut attendees {
            attendee.rsvp = true;
        }
    }
    attendees
}

fn print_events(events: &[EventRecord], output_format: OutputFormat, verbose: bool) {
    let formatter = EventFormatter::new(jiff::tz::TimeZone::system())
        .with_output_format(output_format)
        .with_verbose(verbose);
    print!("{}", formatter.format(events));
}
