// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar and event operations on `CalDAV` servers.
//!
//! The [`Orchestrator`] resolves calendars by display name and events by UID,
//! merges partial updates into the stored event and persists the result
//! through a [`Transport`].

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

mod config;
mod error;
pub mod locator;
mod model;
mod orchestrator;
mod request;
mod session;
mod transport;
mod validate;

pub use davcal_ical::{Attendee, Event, Organizer, PartStat, Role};

pub use crate::config::{CoreConfig, DEFAULT_UID_NAMESPACE};
pub use crate::error::{Error, NotFoundKind};
pub use crate::model::{Calendar, CalendarOptions, Deleted, EventInput, EventPatch, EventRecord};
pub use crate::orchestrator::Orchestrator;
pub use crate::request::{CalendarRequest, EventRequest, Request, Response};
pub use crate::session::Session;
pub use crate::transport::Transport;
