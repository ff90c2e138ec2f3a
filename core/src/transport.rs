// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use davcal_caldav::{
    CalDavClient, CalDavError, CalendarCollection, CalendarQueryRequest, CollectionProps,
    CompFilter, ETag, Href, RawCalendarObject, TimeRange,
};

use crate::Error;

/// The network calls event operations are built on.
///
/// Implemented for [`CalDavClient`]; tests substitute an in-memory server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Authenticates and checks that the server speaks `CalDAV`.
    async fn login(&self) -> Result<(), Error>;

    /// Fetches all calendar collections of the account.
    async fn fetch_collections(&self) -> Result<Vec<CalendarCollection>, Error>;

    /// Fetches the objects of a collection.
    ///
    /// With `filter`, the filter selects the objects and `time_range` is
    /// ignored; otherwise all events overlapping `time_range` are returned.
    async fn fetch_objects(
        &self,
        collection: &Href,
        time_range: Option<TimeRange>,
        filter: Option<CompFilter>,
    ) -> Result<Vec<RawCalendarObject>, Error>;

    /// Stores a new object named `filename`; fails if it already exists.
    async fn create_object(
        &self,
        collection: &Href,
        filename: &str,
        body: &str,
    ) -> Result<RawCalendarObject, Error>;

    /// Replaces an object, only if it still has `etag` when one is given.
    async fn update_object(
        &self,
        object: &Href,
        body: &str,
        etag: Option<&ETag>,
    ) -> Result<RawCalendarObject, Error>;

    /// Removes an object, only if it still has `etag` when one is given.
    async fn delete_object(&self, object: &Href, etag: Option<&ETag>) -> Result<(), Error>;

    /// Creates a calendar collection at `href`.
    async fn create_collection(&self, href: &Href, props: &CollectionProps) -> Result<(), Error>;

    /// Removes a calendar collection with all its objects.
    async fn delete_collection(&self, href: &Href) -> Result<(), Error>;

    /// The collection new calendars are created in.
    fn calendar_home(&self) -> Href;
}

#[async_trait]
impl Transport for CalDavClient {
    async fn login(&self) -> Result<(), Error> {
        let discovered = self.discover().await?;
        if !discovered.supports_calendars {
            return Err(CalDavError::NotACalDavServer.into());
        }
        Ok(())
    }

    async fn fetch_collections(&self) -> Result<Vec<CalendarCollection>, Error> {
        Ok(self.list_calendars().await?)
    }

    async fn fetch_objects(
        &self,
        collection: &Href,
        time_range: Option<TimeRange>,
        filter: Option<CompFilter>,
    ) -> Result<Vec<RawCalendarObject>, Error> {
        let request = match (filter, time_range) {
            (Some(filter), _) => CalendarQueryRequest::new().filter(filter),
            (None, Some(range)) => CalendarQueryRequest::new()
                .component("VEVENT".to_string())
                .time_range(range),
            (None, None) => CalendarQueryRequest::new().component("VEVENT".to_string()),
        };
        Ok(self.query(collection, &request).await?)
    }

    async fn create_object(
        &self,
        collection: &Href,
        filename: &str,
        body: &str,
    ) -> Result<RawCalendarObject, Error> {
        Ok(CalDavClient::create_object(self, collection, filename, body).await?)
    }

    async fn update_object(
        &self,
        object: &Href,
        body: &str,
        etag: Option<&ETag>,
    ) -> Result<RawCalendarObject, Error> {
        Ok(CalDavClient::update_object(self, object, body, etag).await?)
    }

    async fn delete_object(&self, object: &Href, etag: Option<&ETag>) -> Result<(), Error> {
        Ok(CalDavClient::delete_object(self, object, etag).await?)
    }

    async fn create_collection(&self, href: &Href, props: &CollectionProps) -> Result<(), Error> {
        Ok(self.mkcalendar(href, props).await?)
    }

    async fn delete_collection(&self, href: &Href) -> Result<(), Error> {
        Ok(CalDavClient::delete_collection(self, href).await?)
    }

    fn calendar_home(&self) -> Href {
        CalDavClient::calendar_home(self)
    }
}
