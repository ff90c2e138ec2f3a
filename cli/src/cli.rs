// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use davcal_caldav::CalDavClient;
use davcal_core::Orchestrator;

use crate::APP_NAME;
use crate::cmd_batch::CmdBatch;
use crate::cmd_calendar::{CmdCalendarDelete, CmdCalendarList, CmdCalendarNew};
use crate::cmd_event::{
    CmdEventDelete, CmdEventEdit, CmdEventGet, CmdEventList, CmdEventNew, CmdEventSearch,
};
use crate::config::parse_config;

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Manage calendars and events on a CalDAV server.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $DAVCAL_CONFIG, then $XDG_CONFIG_HOME/davcal/config.toml \
on Linux and MacOS, %LOCALAPPDATA%/davcal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(
                Command::new("calendar")
                    .alias("cal")
                    .about("Manage your calendars")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdCalendarNew::command())
                    .subcommand(CmdCalendarDelete::command())
                    .subcommand(CmdCalendarList::command()),
            )
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage the events of a calendar")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventGet::command())
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventSearch::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command()),
            )
            .subcommand(CmdBatch::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("calendar", matches)) => match matches.subcommand() {
                Some((CmdCalendarNew::NAME, m)) => CalendarNew(CmdCalendarNew::from(m)),
                Some((CmdCalendarDelete::NAME, m)) => CalendarDelete(CmdCalendarDelete::from(m)),
                Some((CmdCalendarList::NAME, m)) => CalendarList(CmdCalendarList::from(m)),
                _ => return Err("Unknown calendar command".into()),
            },
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, m)) => EventNew(CmdEventNew::from(m)),
                Some((CmdEventGet::NAME, m)) => EventGet(CmdEventGet::from(m)),
                Some((CmdEventList::NAME, m)) => EventList(CmdEventList::from(m)),
                Some((CmdEventSearch::NAME, m)) => EventSearch(CmdEventSearch::from(m)),
                Some((CmdEventEdit::NAME, m)) => EventEdit(CmdEventEdit::from(m)),
                Some((CmdEventDelete::NAME, m)) => EventDelete(CmdEventDelete::from(m)),
                _ => return Err("Unknown event command".into()),
            },
            Some((CmdBatch::NAME, matches)) => Batch(CmdBatch::from(matches)),
            _ => return Err("No command given".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<ExitCode, Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Create a calendar
    CalendarNew(CmdCalendarNew),

    /// Delete a calendar
    CalendarDelete(CmdCalendarDelete),

    /// List calendars
    CalendarList(CmdCalendarList),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Show one event
    EventGet(CmdEventGet),

    /// List events
    EventList(CmdEventList),

    /// Search events
    EventSearch(CmdEventSearch),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// Run requests from a JSON file
    Batch(CmdBatch),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<ExitCode, Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let client = CalDavClient::new(config.server.to_caldav_config()?)?;
        let orchestrator = Orchestrator::new(client, config.core);

        use Commands::*;
        match self {
            CalendarNew(a)    => a.run(&orchestrator).await?,
            CalendarDelete(a) => a.run(&orchestrator).await?,
            CalendarList(a)   => a.run(&orchestrator).await?,
            EventNew(a)       => a.run(&orchestrator).await?,
            EventGet(a)       => a.run(&orchestrator).await?,
            EventList(a)      => a.run(&orchestrator).await?,
            EventSearch(a)    => a.run(&orchestrator).await?,
            EventEdit(a)      => a.run(&orchestrator).await?,
            EventDelete(a)    => a.run(&orchestrator).await?,
            Batch(a) => {
                if !a.run(&orchestrator).await? {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
