// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! davcal - manage calendars and events on `CalDAV` servers.

use std::error::Error;
use std::process::ExitCode;

use davcal_cli::run;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    run().await
}
