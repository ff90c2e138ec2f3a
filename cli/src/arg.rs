// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use davcal_core::Attendee;

use crate::util::{OutputFormat, parse_attendee};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventStatus::Confirmed => "CONFIRMED",
            EventStatus::Tentative => "TENTATIVE",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CalendarArgs;

impl CalendarArgs {
    pub fn name() -> Arg {
        arg!(name: <NAME> "Display name of the calendar")
    }

    pub fn get_name(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("name")
            .cloned()
            .unwrap_or_default()
    }

    pub fn calendar() -> Arg {
        arg!(--calendar <CALENDAR> "Display name of the calendar")
            .visible_alias("cal")
            .required(true)
    }

    pub fn get_calendar(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("calendar")
            .cloned()
            .unwrap_or_default()
    }

    pub fn color() -> Arg {
        arg!(--color <COLOR> "Color of the calendar, as #RRGGBB")
    }

    pub fn timezone() -> Arg {
        arg!(--timezone <TZ> "IANA time zone of the calendar, e.g. Europe/Berlin")
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the calendar")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn uid() -> Arg {
        arg!(uid: <UID> "UID of the event")
    }

    pub fn get_uid(matches: &ArgMatches) -> String {
        matches.get_one::<String>("uid").cloned().unwrap_or_default()
    }

    pub fn title(positional: bool) -> Arg {
        if positional {
            arg!(title: <TITLE> "Title of the event")
        } else {
            arg!(title: -t --title <TITLE> "Title of the event")
        }
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn start(required: bool) -> Arg {
        arg!(--start <START> "Start, as YYYY-MM-DD HH:MM, YYYY-MM-DD, HH:MM or RFC 3339")
            .required(required)
    }

    pub fn get_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("start").cloned()
    }

    pub fn end(required: bool) -> Arg {
        arg!(--end <END> "End; a bare HH:MM is on the day of the start").required(required)
    }

    pub fn get_end(matches: &ArgMatches) -> Option<String> {
        matches.get_one("end").cloned()
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event, empty to clear")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn location() -> Arg {
        arg!(--location <LOCATION> "Location of the event, empty to clear")
    }

    pub fn get_location(matches: &ArgMatches) -> Option<String> {
        matches.get_one("location").cloned()
    }

    pub fn status() -> Arg {
        arg!(--status <STATUS> "Status of the event")
            .value_parser(value_parser!(EventStatus))
            .ignore_case(true)
    }

    pub fn get_status(matches: &ArgMatches) -> Option<EventStatus> {
        matches.get_one("status").copied()
    }

    pub fn attendee() -> Arg {
        arg!(-a --attendee <ATTENDEE> "Attendee as ADDRESS or \"NAME <ADDRESS>\", repeatable")
            .value_parser(parse_attendee)
            .action(ArgAction::Append)
    }

    pub fn get_attendees(matches: &ArgMatches) -> Option<Vec<Attendee>> {
        matches
            .get_many::<Attendee>("attendee")
            .map(|values| values.cloned().collect())
    }

    pub fn rsvp() -> Arg {
        arg!(--rsvp "Ask the attendees to reply")
    }

    pub fn get_rsvp(matches: &ArgMatches) -> bool {
        matches.get_flag("rsvp")
    }

    pub fn term() -> Arg {
        arg!(term: <TERM> "Text to look for in title, description and location")
    }

    pub fn get_term(matches: &ArgMatches) -> String {
        matches.get_one::<String>("term").cloned().unwrap_or_default()
    }
}
