// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `CalDAV` client for calendar operations.

use std::sync::{Arc, OnceLock};

use reqwest::{Method, RequestBuilder, Response};

use crate::config::CalDavConfig;
use crate::error::CalDavError;
use crate::http::HttpClient;
use crate::request::{CalendarQueryRequest, MkCalendarRequest, Prop, PropFindRequest};
use crate::response::MultiStatusResponse;
use crate::types::{CalendarCollection, CollectionProps, ETag, Href, RawCalendarObject};

/// `CalDAV` client for accessing and managing calendars on `CalDAV` servers.
///
/// # Example
///
/// ```ignore
/// use davcal_caldav::{CalDavClient, CalDavConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CalDavConfig::nextcloud("https://cloud.example.com", "user", "pass");
///
/// let client = CalDavClient::new(config)?;
/// client.discover().await?;
/// let calendars = client.list_calendars().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CalDavClient {
    http: Arc<HttpClient>,
    config: CalDavConfig,
    home: Arc<OnceLock<Href>>,
}

impl CalDavClient {
    /// Creates a new `CalDAV` client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: CalDavConfig) -> Result<Self, CalDavError> {
        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
            home: Arc::new(OnceLock::new()),
        })
    }

    /// Discovers `CalDAV` support and calendar home set.
    ///
    /// The discovered home replaces the configured one for all later calls.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails.
    pub async fn discover(&self) -> Result<DiscoverResult, CalDavError> {
        let configured = self.config.calendar_home.as_str();
        tracing::debug!(href = configured, "discovering CalDAV support");

        // Check for CalDAV support
        let resp = self
            .http
            .execute(self.http.build_request(Method::OPTIONS, configured)?)
            .await?;

        let supports_calendars = resp
            .headers()
            .get_all("DAV")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.contains("calendar-access"));

        // Find calendar home set
        let mut propfind = PropFindRequest::new();
        propfind.add_property(Prop::CalendarHomeSet);
        let req = self
            .http
            .build_xml_request("PROPFIND", configured, propfind.build()?)?
            .header("Depth", "0");
        let multistatus = Self::multistatus(self.http.execute(req).await?).await?;

        let calendar_home = multistatus
            .calendar_home_set()
            .unwrap_or_else(|| Href::new(configured.to_string()));
        tracing::debug!(home = %calendar_home, "discovered calendar home");
        let _ = self.home.set(calendar_home.clone());

        Ok(DiscoverResult {
            supports_calendars,
            calendar_home,
        })
    }

    /// The calendar home: discovered if [`Self::discover`] ran, else configured.
    #[must_use]
    pub fn calendar_home(&self) -> Href {
        self.home
            .get()
            .cloned()
            .unwrap_or_else(|| Href::new(self.config.calendar_home.clone()))
    }

    /// Gets list of calendar collections in the calendar home.
    ///
    /// # Errors
    ///
    /// Returns an error if PROPFIND fails.
    pub async fn list_calendars(&self) -> Result<Vec<CalendarCollection>, CalDavError> {
        let home = self.calendar_home();
        tracing::debug!(%home, "listing calendars");

        let mut propfind = PropFindRequest::new();
        propfind
            .add_property(Prop::DisplayName)
            .add_property(Prop::ResourceType)
            .add_property(Prop::CalendarDescription)
            .add_property(Prop::SupportedCalendarComponents)
            .add_property(Prop::CalendarColor)
            .add_property(Prop::CalendarTimezoneId);

        let req = self
            .http
            .build_xml_request("PROPFIND", &home, propfind.build()?)?
            .header("Depth", "1");
        let multistatus = Self::multistatus(self.http.execute(req).await?).await?;
        Ok(multistatus.into_collections())
    }

    /// Queries calendar objects with filters.
    ///
    /// # Errors
    ///
    /// Returns an error if query fails.
    pub async fn query(
        &self,
        calendar_href: &Href,
        request: &CalendarQueryRequest,
    ) -> Result<Vec<RawCalendarObject>, CalDavError> {
        tracing::debug!(calendar = %calendar_href, "querying calendar objects");
        let req = self
            .http
            .build_xml_request("REPORT", calendar_href, request.build()?)?
            .header("Depth", "1");
        let multistatus = Self::multistatus(self.http.execute(req).await?).await?;
        Ok(multistatus.into_objects())
    }

    /// Creates a new calendar object named `filename` in a calendar.
    ///
    /// Fails with [`CalDavError::PreconditionFailed`] if the object exists.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails.
    pub async fn create_object(
        &self,
        calendar_href: &Href,
        filename: &str,
        ical_data: &str,
    ) -> Result<RawCalendarObject, CalDavError> {
        let href = calendar_href.join(filename);
        tracing::debug!(%href, "creating calendar object");
        let req = HttpClient::if_none_match_any(self.put_request(&href, ical_data)?);
        let resp = self.http.execute(req).await?;
        Self::stored_object(href, resp, ical_data).await
    }

    /// Replaces an existing calendar object.
    ///
    /// With `etag`, the update only succeeds if the object is unchanged on the
    /// server; otherwise it fails with [`CalDavError::PreconditionFailed`].
    ///
    /// # Errors
    ///
    /// Returns an error if update fails or `ETag` mismatch.
    pub async fn update_object(
        &self,
        href: &Href,
        ical_data: &str,
        etag: Option<&ETag>,
    ) -> Result<RawCalendarObject, CalDavError> {
        tracing::debug!(%href, conditional = etag.is_some(), "updating calendar object");
        let mut req = self.put_request(href, ical_data)?;
        if let Some(etag) = etag {
            req = HttpClient::if_match(req, etag);
        }
        let resp = self.http.execute(req).await?;
        Self::stored_object(href.clone(), resp, ical_data).await
    }

    /// Deletes a calendar object.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete_object(&self, href: &Href, etag: Option<&ETag>) -> Result<(), CalDavError> {
        tracing::debug!(%href, conditional = etag.is_some(), "deleting calendar object");
        let mut req = self.http.build_request(Method::DELETE, href)?;
        if let Some(etag) = etag {
            req = HttpClient::if_match(req, etag);
        }
        self.http.execute(req).await?;
        Ok(())
    }

    /// Creates a new calendar collection.
    ///
    /// # Errors
    ///
    /// Returns an error if MKCALENDAR fails.
    pub async fn mkcalendar(&self, href: &Href, props: &CollectionProps) -> Result<(), CalDavError> {
        tracing::debug!(%href, name = %props.display_name, "creating calendar");
        let body = MkCalendarRequest::new(props).build()?;
        let req = self.http.build_xml_request("MKCALENDAR", href, body)?;
        self.http.execute(req).await?;
        Ok(())
    }

    /// Deletes a calendar collection and everything in it.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete_collection(&self, href: &Href) -> Result<(), CalDavError> {
        tracing::debug!(%href, "deleting calendar");
        let req = self.http.build_request(Method::DELETE, href)?;
        self.http.execute(req).await?;
        Ok(())
    }

    fn put_request(&self, href: &Href, ical_data: &str) -> Result<RequestBuilder, CalDavError> {
        Ok(self
            .http
            .build_request(Method::PUT, href)?
            .header("Content-Type", "text/calendar; charset=utf-8")
            .header("Prefer", "return=representation")
            .body(ical_data.to_string()))
    }

    /// Builds the object stored by a `PUT`, preferring the representation the
    /// server echoed back over the data that was sent.
    async fn stored_object(
        href: Href,
        resp: Response,
        sent: &str,
    ) -> Result<RawCalendarObject, CalDavError> {
        let etag = HttpClient::extract_etag(&resp);
        let body = resp.text().await?;
        let data = if body.contains("BEGIN:VCALENDAR") {
            body
        } else {
            sent.to_string()
        };
        Ok(RawCalendarObject::Inline {
            url: href,
            etag,
            data: Some(data),
        })
    }

    async fn multistatus(resp: Response) -> Result<MultiStatusResponse, CalDavError> {
        let xml = resp.text().await?;
        MultiStatusResponse::from_xml(&xml)
    }
}

/// Result of `CalDAV` server discovery.
#[derive(Debug, Clone)]
pub struct DiscoverResult {
    /// Whether the server supports `CalDAV`.
    pub supports_calendars: bool,
    /// The calendar home set href.
    pub calendar_home: Href,
}
