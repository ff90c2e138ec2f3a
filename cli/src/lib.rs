// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for managing calendars and events on a `CalDAV`
//! server, plus a batch runner for JSON requests.

mod arg;
mod calendar_formatter;
mod cli;
mod cmd_batch;
mod cmd_calendar;
mod cmd_event;
mod config;
mod event_formatter;
mod table;
mod util;

use std::{error::Error, process::ExitCode};

use colored::Colorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::cli::{Cli, Commands};
pub use crate::cmd_batch::{Failure, Outcome, run_batch};
pub use crate::config::Config;

/// Name of the application, used for the config directory.
pub const APP_NAME: &str = "davcal";

/// Run the davcal command-line interface.
pub async fn run() -> Result<ExitCode, Box<dyn Error>> {
    let filter = EnvFilter::try_from_env("DAVCAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match Cli::parse() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(code) => Ok(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}
