// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Resolution of calendar names and event UIDs to server objects.

use davcal_caldav::{
    CalendarCollection, CalendarObject, CompFilter, FilterTest, MatchType, PropFilter, RawCalendarObject, TextMatch,
};

use crate::{Calendar, Error, Transport};

/// Builds the server-side filter selecting the event with `uid`.
///
/// The UID is compared octet by octet, so the match is exact.
#[must_use]
pub fn uid_filter(uid: &str) -> CompFilter {
    CompFilter::new("VCALENDAR").comp_filter(
        CompFilter::new("VEVENT")
            .test(FilterTest::AllOf)
            .prop_filter(PropFilter {
                name: "UID".to_string(),
                test: None,
                text_match: Some(TextMatch {
                    text: uid.to_string(),
                    collation: Some("i;octet".to_string()),
                    match_type: Some(MatchType::Equals),
                    negate: false,
                }),
            }),
    )
}

/// Whether a collection can hold events.
///
/// Servers that do not report their supported components are taken to
/// accept events.
#[must_use]
pub fn holds_events(collection: &CalendarCollection) -> bool {
    collection.supported_components.is_empty()
        || collection
            .supported_components
            .iter()
            .any(|c| c.eq_ignore_ascii_case("VEVENT"))
}

/// Picks the first calendar whose display name is exactly `name`.
pub(crate) fn pick_calendar<'a, I>(calendars: I, name: &str) -> Result<Calendar, Error>
where
    I: IntoIterator<Item = &'a Calendar>,
{
    calendars
        .into_iter()
        .find(|c| c.display_name == name)
        .cloned()
        .ok_or_else(|| Error::calendar_not_found(name))
}

/// Resolves a calendar display name, fetching the collections afresh.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no calendar has this name.
pub async fn find_calendar<T>(transport: &T, name: &str) -> Result<Calendar, Error>
where
    T: Transport + ?Sized,
{
    let calendars: Vec<Calendar> = transport
        .fetch_collections()
        .await?
        .into_iter()
        .filter(holds_events)
        .map(Calendar::from)
        .collect();
    tracing::debug!(name, count = calendars.len(), "resolving calendar");
    pick_calendar(&calendars, name)
}

/// Finds the event with `uid` in a calendar through a filter query.
///
/// Objects without calendar data are skipped.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no object matches and [`Error::Conflict`]
/// if more than one does.
pub async fn find_event_by_uid<T>(
    transport: &T,
    calendar: &Calendar,
    uid: &str,
) -> Result<CalendarObject, Error>
where
    T: Transport + ?Sized,
{
    let objects = transport
        .fetch_objects(&calendar.url, None, Some(uid_filter(uid)))
        .await?;

    let mut matches = objects.into_iter().filter_map(RawCalendarObject::normalize);
    let Some(first) = matches.next() else {
        return Err(Error::event_not_found(uid));
    };
    if let Some(second) = matches.next() {
        tracing::warn!(uid, first = %first.url, second = %second.url, "ambiguous UID");
        return Err(Error::Conflict(format!(
            "UID {uid} matches more than one object in calendar \"{}\"",
            calendar.display_name
        )));
    }
    Ok(first)
}
