// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Encode and decode iCalendar events for exchange with CalDAV servers.
//!
//! Covers a small subset of RFC 5545: one `VEVENT` per object,
//! UTC timestamps only, no recurrence, alarms or `VTIMEZONE`.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod content_line;
mod datetime;
mod duration;
mod event;
mod formatter;
pub mod keyword;
mod parser;
pub mod participant;
pub mod text;

pub use crate::event::{Attendee, Event, Organizer, PartStat, Role};
pub use crate::formatter::{PRODID, encode};
pub use crate::parser::{DecodeError, decode};
