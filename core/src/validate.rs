// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Input checks that run before any network call.

use std::sync::OnceLock;

use davcal_ical::Attendee;
use jiff::Timestamp;
use regex::Regex;

use crate::{CoreConfig, Error, EventInput, EventPatch};

/// `local@domain`, with the character sets of the HTML living standard.
const EMAIL_RE: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$";

pub(crate) fn is_email(s: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(EMAIL_RE).unwrap());
    re.is_match(s)
}

pub(crate) fn calendar_name(name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::Validation("calendar name must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn uid(uid: &str) -> Result<(), Error> {
    if uid.trim().is_empty() {
        return Err(Error::Validation("event UID must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn time_span(start: Timestamp, end: Timestamp) -> Result<(), Error> {
    if end <= start {
        return Err(Error::Validation(format!(
            "event end ({end}) must be after its start ({start})"
        )));
    }
    Ok(())
}

pub(crate) fn attendees(attendees: &[Attendee]) -> Result<(), Error> {
    match attendees.iter().find(|a| !is_email(&a.email)) {
        Some(a) => Err(Error::Validation(format!(
            "invalid attendee email: {:?}",
            a.email
        ))),
        None => Ok(()),
    }
}

pub(crate) fn event_input(input: &EventInput) -> Result<(), Error> {
    time_span(input.start, input.end)?;
    attendees(&input.attendees)
}

/// Checks the patch on its own; the merged event is checked again later.
pub(crate) fn event_patch(patch: &EventPatch) -> Result<(), Error> {
    if let (Some(start), Some(end)) = (patch.start, patch.end) {
        time_span(start, end)?;
    }
    match &patch.attendees {
        Some(list) => attendees(list),
        None => Ok(()),
    }
}

/// The configured organizer ends up on every event written.
pub(crate) fn organizer(config: &CoreConfig) -> Result<(), Error> {
    match &config.organizer_email {
        Some(email) if !is_email(email) => Err(Error::Validation(format!(
            "invalid organizer email in configuration: {email:?}"
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn time_range(start: Timestamp, end: Timestamp) -> Result<(), Error> {
    if end <= start {
        return Err(Error::Validation(format!(
            "range end ({end}) must be after its start ({start})"
        )));
    }
    Ok(())
}
