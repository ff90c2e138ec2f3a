// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use davcal_core::{Orchestrator, Request, Response, Transport};
use tokio::io::AsyncReadExt;

/// Runs a JSON array of requests in one session.
#[derive(Debug, Clone)]
pub struct CmdBatch {
    pub file: Option<PathBuf>,
    pub continue_on_fail: bool,
}

impl CmdBatch {
    pub const NAME: &str = "batch";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Run a JSON array of requests, reading stdin if no file is given")
            .arg(
                arg!([FILE] "File with the requests, - for stdin")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(--"continue-on-fail" "Keep going after a request fails"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: matches.get_one("FILE").cloned(),
            continue_on_fail: matches.get_flag("continue-on-fail"),
        }
    }

    /// Prints one outcome per request; returns whether all succeeded.
    pub async fn run<T: Transport>(
        self,
        orchestrator: &Orchestrator<T>,
    ) -> Result<bool, Box<dyn Error>> {
        tracing::debug!(?self, "running batch...");
        let input = self.read_input().await?;
        let items: Vec<serde_json::Value> = serde_json::from_str(&input)
            .map_err(|e| format!("Batch input must be a JSON array of requests: {e}"))?;

        let outcomes = run_batch(orchestrator, items, self.continue_on_fail).await;
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        Ok(outcomes.iter().all(Outcome::is_ok))
    }

    async fn read_input(&self) -> Result<String, Box<dyn Error>> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read {}: {e}", path.display()).into()),
            _ => {
                let mut input = String::new();
                tokio::io::stdin().read_to_string(&mut input).await?;
                Ok(input)
            }
        }
    }
}

/// What happened to one request of a batch.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ok(Response),
    Error(Failure),
    /// Not run because an earlier request failed.
    Skipped,
}

impl Outcome {
    pub const fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }
}

#[derive(Debug, serde::Serialize)]
pub struct Failure {
    pub kind: &'static str,
    pub message: String,
}

/// Runs `items` in order through one session.
///
/// Each item is parsed on its own so a malformed request fails alone. Unless
/// `continue_on_fail` is set, the items after the first failure are skipped.
pub async fn run_batch<T: Transport>(
    orchestrator: &Orchestrator<T>,
    items: Vec<serde_json::Value>,
    continue_on_fail: bool,
) -> Vec<Outcome> {
    let mut session = orchestrator.session();
    let mut outcomes = Vec::with_capacity(items.len());
    let mut failed = false;

    for (index, item) in items.into_iter().enumerate() {
        if failed && !continue_on_fail {
            outcomes.push(Outcome::Skipped);
            continue;
        }

        let outcome = match serde_json::from_value::<Request>(item) {
            Ok(request) => {
                let operation = request.operation();
                match session.execute(request).await {
                    Ok(response) => {
                        tracing::info!(index, operation, "request succeeded");
                        Outcome::Ok(response)
                    }
                    Err(err) => {
                        tracing::warn!(index, operation, %err, "request failed");
                        Outcome::Error(Failure {
                            kind: err.kind(),
                            message: err.to_string(),
                        })
                    }
                }
            }
            Err(err) => {
                tracing::warn!(index, %err, "invalid request");
                Outcome::Error(Failure {
                    kind: "invalid_request",
                    message: err.to_string(),
                })
            }
        };

        failed |= !outcome.is_ok();
        outcomes.push(outcome);
    }
    outcomes
}
