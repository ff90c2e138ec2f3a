// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;

use crate::locator::pick_calendar;
use crate::orchestrator::filter_events;
use crate::{
    Calendar, CalendarOptions, Deleted, Error, EventInput, EventPatch, EventRecord, Orchestrator,
    Request, Response, Transport, validate,
};

/// A batch of operations sharing one login and one calendar lookup.
///
/// The session logs in on first use and fetches the calendar list at most
/// once; calendars created or deleted through the session are reflected in
/// it. Drop the session at the end of the batch.
#[derive(Debug)]
pub struct Session<'a, T> {
    orchestrator: &'a Orchestrator<T>,
    logged_in: bool,
    calendars: Option<Vec<Calendar>>,
}

impl<'a, T: Transport> Session<'a, T> {
    pub(crate) const fn new(orchestrator: &'a Orchestrator<T>) -> Self {
        Self {
            orchestrator,
            logged_in: false,
            calendars: None,
        }
    }

    /// Runs a request, dispatching to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns the error of the operation.
    pub async fn execute(&mut self, request: Request) -> Result<Response, Error> {
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

    /// See [`Orchestrator::create_calendar`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if a calendar with this name exists.
    #[tracing::instrument(skip(self, options))]
    pub async fn create_calendar(
        &mut self,
        name: &str,
        options: CalendarOptions,
    ) -> Result<Calendar, Error> {
        validate::calendar_name(name)?;
        let orchestrator = self.orchestrator;
        let calendars = self.calendars().await?;
        let calendar = orchestrator
            .create_calendar_among(calendars, name, options)
            .await?;
        if let Some(memo) = self.calendars.as_mut() {
            memo.push(calendar.clone());
        }
        Ok(calendar)
    }

    /// See [`Orchestrator::delete_calendar`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no calendar has this name.
    #[tracing::instrument(skip(self))]
    pub async fn delete_calendar(&mut self, name: &str) -> Result<Deleted, Error> {
        validate::calendar_name(name)?;
        let calendar = self.resolve(name).await?;
        let deleted = self.orchestrator.delete_calendar_in(&calendar).await?;
        if let Some(memo) = self.calendars.as_mut() {
            memo.retain(|c| c.url != calendar.url);
        }
        Ok(deleted)
    }

    /// Lists all calendars, refreshing the remembered list.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    #[tracing::instrument(skip(self))]
    pub async fn list_calendars(&mut self) -> Result<Vec<Calendar>, Error> {
        self.ensure_login().await?;
        let calendars = self.orchestrator.fetch_calendars().await?;
        self.calendars = Some(calendars.clone());
        Ok(calendars)
    }

    /// See [`Orchestrator::create_event`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any network call if the input is
    /// malformed.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_event(
        &mut self,
        calendar: &str,
        input: EventInput,
    ) -> Result<EventRecord, Error> {
        validate::calendar_name(calendar)?;
        validate::event_input(&input)?;
        validate::organizer(self.orchestrator.config())?;
        let calendar = self.resolve(calendar).await?;
        self.orchestrator.create_event_in(&calendar, input).await
    }

    /// See [`Orchestrator::get_event`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar or the event is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn get_event(&mut self, calendar: &str, uid: &str) -> Result<EventRecord, Error> {
        validate::calendar_name(calendar)?;
        validate::uid(uid)?;
        let calendar = self.resolve(calendar).await?;
        self.orchestrator.get_event_in(&calendar, uid).await
    }

    /// See [`Orchestrator::list_events`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn list_events(
        &mut self,
        calendar: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<EventRecord>, Error> {
        validate::calendar_name(calendar)?;
        validate::time_range(start, end)?;
        let calendar = self.resolve(calendar).await?;
        self.orchestrator.list_events_in(&calendar, start, end).await
    }

    /// See [`Orchestrator::search_events`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn search_events(
        &mut self,
        calendar: &str,
        term: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<EventRecord>, Error> {
        validate::calendar_name(calendar)?;
        validate::time_range(start, end)?;
        let calendar = self.resolve(calendar).await?;
        let events = self
            .orchestrator
            .list_events_in(&calendar, start, end)
            .await?;
        Ok(filter_events(events, term))
    }

    /// See [`Orchestrator::update_event`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar or the event is unknown,
    /// and [`Error::Conflict`] if the event changed on the server meanwhile.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_event(
        &mut self,
        calendar: &str,
        uid: &str,
        patch: EventPatch,
    ) -> Result<EventRecord, Error> {
        validate::calendar_name(calendar)?;
        validate::uid(uid)?;
        validate::event_patch(&patch)?;
        validate::organizer(self.orchestrator.config())?;
        let calendar = self.resolve(calendar).await?;
        self.orchestrator
            .update_event_in(&calendar, uid, &patch)
            .await
    }

    /// See [`Orchestrator::delete_event`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the calendar or the event is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&mut self, calendar: &str, uid: &str) -> Result<Deleted, Error> {
        validate::calendar_name(calendar)?;
        validate::uid(uid)?;
        let calendar = self.resolve(calendar).await?;
        self.orchestrator.delete_event_in(&calendar, uid).await
    }

    async fn ensure_login(&mut self) -> Result<(), Error> {
        if !self.logged_in {
            self.orchestrator.transport().login().await?;
            self.logged_in = true;
        }
        Ok(())
    }

    async fn calendars(&mut self) -> Result<&[Calendar], Error> {
        self.ensure_login().await?;
        if self.calendars.is_none() {
            let fetched = self.orchestrator.fetch_calendars().await?;
            tracing::debug!(count = fetched.len(), "remembering calendars for this session");
            self.calendars = Some(fetched);
        }
        Ok(self.calendars.as_deref().unwrap_or_default())
    }

    async fn resolve(&mut self, name: &str) -> Result<Calendar, Error> {
        let calendars = self.calendars().await?;
        pick_calendar(calendars, name)
    }
}
