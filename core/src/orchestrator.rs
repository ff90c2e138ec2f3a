// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use davcal_caldav::{CalendarObject, ETag, Href, RawCalendarObject, TimeRange};
use jiff::Timestamp;
use uuid::Uuid;

use crate::locator::{self, find_event_by_uid};
use crate::session::Session;
use crate::{
    Calendar, CalendarOptions, CoreConfig, Deleted, Error, EventInput, EventPatch, EventRecord,
    Request, Response, Transport, validate,
};

/// Calendar and event operations against a [`Transport`].
///
/// Every operation validates its input, logs in and resolves the calendar
/// afresh. Use [`Orchestrator::session`] to share the login and calendar
/// lookups across a batch of operations.
#[derive(Debug)]
pub struct Orchestrator<T> {
    transport: T,
    config: CoreConfig,
}

impl<T: Transport> Orchestrator<T> {
    /// Creates a new orchestrator.
    pub const fn new(transport: T, config: CoreConfig) -> Self {
        Self { transport, config }
    }

    /// The transport in use.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The configuration in use.
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Starts a session that logs in once and remembers calendar lookups.
    pub fn session(&self) -> Session<'_, T> {
        Session::new(self)
    }

    /// Runs a request, dispatching to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns the error of the operation.
    pub async fn execute(&self, request: Request) -> Result<Response, Error> {
        use crate::request::{CalendarRequest as C, EventRequest as E};

        Ok(match request {
            Request::Calendar(C::Create { name, options }) => {
                Response::Calendar(self.create_calendar(&name, options).await?)
            }
            Request::Calendar(C::Delete { name }) => {
                Response::Deleted(self.delete_calendar(&name).await?)
            }
            Request::Calendar(C::List) => Response::Calendars(self.list_calendars().await?),
            Request::Event(E::Create { calendar, input }) => {
                Response::Event(self.create_event(&calendar, input).await?)
            }
            Request::Event(E::Get { calendar, uid }) => {
                Response::Event(self.get_event(&calendar, &uid).await?)
            }
            Request::Event(E::List {
                calendar,
                start,
                end,
            }) => Response::Events(self.list_events(&calendar, start, end).await?),
            Request::Event(E::Search {
                calendar,
                term,
                start,
                end,
            }) => Response::Events(self.search_events(&calendar, &term, start, end).await?),
            Request::Event(E::Update {
                calendar,
                uid,
                patch,
            }) => Response::Event(self.update_event(&calendar, &uid, patch).await?),
            Request::Event(E::Delete { calendar, uid }) => {
                Response::Deleted(self.delete_event(&calendar, &uid).await?)
            }
        })
    }

    /// Creates a calendar named `name` under the calendar home.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if a calendar with this name exists.
    #[tracing::instrument(skip(self, options))]
    pub async fn create_calendar(
        &self,
        name: &str,
        options: CalendarOptions,
    ) -> Result<Calendar, Error> {
        validate::calendar_name(name)?;
        let existing = self.calendars().await?;
        self.create_calendar_among(&existing, name, options).await
    }

    /// Deletes the calendar named `name` with all its events.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no calendar has this name.
    #[tracing::instrument(skip(self))]
    pub async fn delete_calendar(&self, name: &str) -> Result<Deleted, Error> {
        validate::calendar_name(name)?;
        let calendar = self.resolve(name).await?;
        self.delete_calendar_in(&calendar).await
    }

    /// Lists all calendars of the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    #[tracing::instrument(skip(self))]
    pub async fn list_calendars(&self) -> Result<Vec<Calendar>, Error> {
        self.calendars().await
    }

    /// Creates an event in the calendar named `calendar`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any network call if the input is
    /// malformed.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_event(
        &self,
        calendar: &str,
        input: EventInput,
    ) -> Result<EventRecord, Error> {
        validate::calendar_name(calendar)?;
        validate::event_input(&input)?;
        validate::organizer(&self.config)?;
        let calendar = self.resolve(calendar).await?;
        self.create_event_in(&calendar, input).await
    }

    /// Gets the event with `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar or the event is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn get_event(&self, calendar: &str, uid: &str) -> Result<EventRecord, Error> {
        validate::calendar_name(calendar)?;
        validate::uid(uid)?;
        let calendar = self.resolve(calendar).await?;
        self.get_event_in(&calendar, uid).await
    }

    /// Lists the events overlapping `[start, end)`, by ascending start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar is unknown. No events is
    /// not an error.
    #[tracing::instrument(skip(self))]
    pub async fn list_events(
        &self,
        calendar: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<EventRecord>, Error> {
        validate::calendar_name(calendar)?;
        validate::time_range(start, end)?;
        let calendar = self.resolve(calendar).await?;
        self.list_events_in(&calendar, start, end).await
    }

    /// Lists the events overlapping `[start, end)` whose title, description
    /// or location contains `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar is unknown. No matches is
    /// not an error.
    #[tracing::instrument(skip(self))]
    pub async fn search_events(
        &self,
        calendar: &str,
        term: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<EventRecord>, Error> {
        validate::calendar_name(calendar)?;
        validate::time_range(start, end)?;
        let calendar = self.resolve(calendar).await?;
        let events = self.list_events_in(&calendar, start, end).await?;
        Ok(filter_events(events, term))
    }

    /// Updates the event with `uid`, keeping every field the patch leaves
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar or the event is unknown,
    /// and [`Error::Conflict`] if the event changed on the server meanwhile.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_event(
        &self,
        calendar: &str,
        uid: &str,
        patch: EventPatch,
    ) -> Result<EventRecord, Error> {
        validate::calendar_name(calendar)?;
        validate::uid(uid)?;
        validate::event_patch(&patch)?;
        validate::organizer(&self.config)?;
        let calendar = self.resolve(calendar).await?;
        self.update_event_in(&calendar, uid, &patch).await
    }

    /// Deletes the event with `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar or the event is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&self, calendar: &str, uid: &str) -> Result<Deleted, Error> {
        validate::calendar_name(calendar)?;
        validate::uid(uid)?;
        let calendar = self.resolve(calendar).await?;
        self.delete_event_in(&calendar, uid).await
    }

    async fn resolve(&self, name: &str) -> Result<Calendar, Error> {
        self.transport.login().await?;
        locator::find_calendar(&self.transport, name).await
    }

    async fn calendars(&self) -> Result<Vec<Calendar>, Error> {
        self.transport.login().await?;
        self.fetch_calendars().await
    }

    pub(crate) async fn fetch_calendars(&self) -> Result<Vec<Calendar>, Error> {
        let collections = self.transport.fetch_collections().await?;
        Ok(collections
            .into_iter()
            .filter(locator::holds_events)
            .map(Calendar::from)
            .collect())
    }

    pub(crate) async fn create_calendar_among(
        &self,
        existing: &[Calendar],
        name: &str,
        options: CalendarOptions,
    ) -> Result<Calendar, Error> {
        if existing.iter().any(|c| c.display_name == name) {
            return Err(Error::Conflict(format!("calendar \"{name}\" already exists")));
        }

        let href = collection_href(&self.transport.calendar_home(), name, existing);
        let props = options.into_props(name);
        tracing::debug!(%href, "creating calendar collection");
        self.transport.create_collection(&href, &props).await?;

        Ok(Calendar {
            display_name: props.display_name,
            url: href,
            color: props.color,
            timezone: props.timezone,
            description: props.description,
        })
    }

    pub(crate) async fn delete_calendar_in(&self, calendar: &Calendar) -> Result<Deleted, Error> {
        tracing::debug!(href = %calendar.url, "deleting calendar collection");
        self.transport.delete_collection(&calendar.url).await?;
        Ok(Deleted::calendar())
    }

    pub(crate) async fn create_event_in(
        &self,
        calendar: &Calendar,
        input: EventInput,
    ) -> Result<EventRecord, Error> {
        let uid = self.new_uid();
        let mut event = input.into_event();
        event.uid = Some(uid.clone());
        event.organizer = self.config.organizer();

        let body = davcal_ical::encode(&event, Timestamp::now());
        let filename = format!("{uid}.ics");
        tracing::debug!(%uid, calendar = %calendar.url, "creating event");
        let stored = self
            .transport
            .create_object(&calendar.url, &filename, &body)
            .await?;
        into_record(stored, body)
    }

    pub(crate) async fn get_event_in(
        &self,
        calendar: &Calendar,
        uid: &str,
    ) -> Result<EventRecord, Error> {
        let object = find_event_by_uid(&self.transport, calendar, uid).await?;
        decode_object(object)
    }

    pub(crate) async fn list_events_in(
        &self,
        calendar: &Calendar,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<EventRecord>, Error> {
        let objects = self
            .transport
            .fetch_objects(&calendar.url, Some(TimeRange::new(start, end)), None)
            .await?;

        let mut events = objects
            .into_iter()
            .filter_map(RawCalendarObject::normalize)
            .map(decode_object)
            .collect::<Result<Vec<_>, _>>()?;
        events.sort_by_key(|e| e.event.start);
        tracing::debug!(count = events.len(), "listed events");
        Ok(events)
    }

    pub(crate) async fn update_event_in(
        &self,
        calendar: &Calendar,
        uid: &str,
        patch: &EventPatch,
    ) -> Result<EventRecord, Error> {
        let existing = find_event_by_uid(&self.transport, calendar, uid).await?;
        let mut event = davcal_ical::decode(&existing.text)?;

        patch.apply_to(&mut event);
        if event.uid.is_none() {
            event.uid = Some(uid.to_string());
        }
        if event.organizer.is_none() {
            event.organizer = self.config.organizer();
        }
        // A stored instant stays editable as long as its times are untouched
        if patch.start.is_some() || patch.end.is_some() {
            validate::time_span(event.start, event.end)?;
        }

        let body = davcal_ical::encode(&event, Timestamp::now());
        let etag = self.precondition(&existing);
        tracing::debug!(href = %existing.url, conditional = etag.is_some(), "updating event");
        let stored = self
            .transport
            .update_object(&existing.url, &body, etag)
            .await?;
        into_record(stored, body)
    }

    pub(crate) async fn delete_event_in(
        &self,
        calendar: &Calendar,
        uid: &str,
    ) -> Result<Deleted, Error> {
        let existing = find_event_by_uid(&self.transport, calendar, uid).await?;
        let etag = self.precondition(&existing);
        tracing::debug!(href = %existing.url, conditional = etag.is_some(), "deleting event");
        self.transport.delete_object(&existing.url, etag).await?;
        Ok(Deleted::event(uid))
    }

    fn precondition<'a>(&self, object: &'a CalendarObject) -> Option<&'a ETag> {
        match self.config.etag_precondition {
            true => object.etag.as_ref(),
            false => None,
        }
    }

    fn new_uid(&self) -> String {
        format!(
            "{}-{}@{}",
            Timestamp::now().as_millisecond(),
            Uuid::new_v4().simple(),
            self.config.uid_namespace
        )
    }
}

/// Keeps the events matching `term` in title, description or location.
pub(crate) fn filter_events(events: Vec<EventRecord>, term: &str) -> Vec<EventRecord> {
    events.into_iter().filter(|e| e.event.matches(term)).collect()
}

fn decode_object(object: CalendarObject) -> Result<EventRecord, Error> {
    let event = davcal_ical::decode(&object.text)?;
    Ok(EventRecord {
        event,
        url: object.url,
        etag: object.etag,
    })
}

/// Decodes what the server stored, falling back to the data that was sent
/// when the server did not echo it.
fn into_record(stored: RawCalendarObject, sent: String) -> Result<EventRecord, Error> {
    let url = stored.href().clone();
    let etag = match &stored {
        RawCalendarObject::Inline { etag, .. } => etag.clone(),
        RawCalendarObject::PropBag { getetag, .. } => getetag.clone(),
    };
    let object = stored.normalize().unwrap_or(CalendarObject {
        url,
        etag,
        text: sent,
    });
    decode_object(object)
}

/// Path of a new collection: a slug of `name` under `home`, made unique
/// among the `existing` calendars.
fn collection_href(home: &Href, name: &str, existing: &[Calendar]) -> Href {
    let slug = slugify(name);
    let taken = |href: &Href| existing.iter().any(|c| c.url == *href);

    if !slug.is_empty() {
        let href = home.join(&format!("{slug}/"));
        if !taken(&href) {
            return href;
        }
    }
    home.join(&format!("{}/", Uuid::new_v4().simple()))
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
