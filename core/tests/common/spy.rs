// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory `CalDAV` server that records every call it receives.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use davcal_caldav::{
    CalDavError, CalendarCollection, CollectionProps, CompFilter, ETag, Href, RawCalendarObject,
    TimeRange,
};
use davcal_core::{Error, Transport};

/// A call received by the spy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login,
    FetchCollections,
    FetchObjects { collection: Href, filtered: bool },
    CreateObject { collection: Href, filename: String },
    UpdateObject { object: Href, etag: Option<ETag> },
    DeleteObject { object: Href, etag: Option<ETag> },
    CreateCollection { href: Href },
    DeleteCollection { href: Href },
}

#[derive(Debug)]
struct StoredObject {
    href: Href,
    etag: ETag,
    text: String,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    home: Href,
    collections: Vec<CalendarCollection>,
    objects: Vec<StoredObject>,
    etag_seq: u64,
    reject_login: bool,
    interfere_next_write: bool,
}

impl State {
    fn next_etag(&mut self) -> ETag {
        self.etag_seq += 1;
        ETag::new(format!("\"{}\"", self.etag_seq))
    }

    fn object_mut(&mut self, href: &Href) -> Result<&mut StoredObject, Error> {
        self.objects
            .iter_mut()
            .find(|o| o.href == *href)
            .ok_or_else(|| CalDavError::NotFound(href.clone()).into())
    }

    /// Changes the object behind the caller's back if asked to.
    fn maybe_interfere(&mut self, href: &Href) {
        if std::mem::take(&mut self.interfere_next_write) {
            let etag = self.next_etag();
            if let Ok(object) = self.object_mut(href) {
                object.etag = etag;
            }
        }
    }

    fn check_etag(&mut self, href: &Href, etag: Option<&ETag>) -> Result<(), Error> {
        let current = &self.object_mut(href)?.etag;
        match etag {
            Some(expected) if expected != current => {
                Err(CalDavError::PreconditionFailed(current.to_string()).into())
            }
            _ => Ok(()),
        }
    }
}

/// Spy transport backed by an in-memory calendar store.
#[derive(Debug, Clone)]
pub struct SpyTransport {
    state: Arc<Mutex<State>>,
}

impl SpyTransport {
    pub fn new() -> Self {
        let state = State {
            home: Href::from("/calendars/alice/"),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Adds a calendar collection and returns its href.
    pub fn add_calendar(&self, name: &str, segment: &str) -> Href {
        self.add_collection(name, segment, &["VEVENT"])
    }

    /// Adds a collection that only holds tasks.
    pub fn add_task_list(&self, name: &str, segment: &str) -> Href {
        self.add_collection(name, segment, &["VTODO"])
    }

    fn add_collection(&self, name: &str, segment: &str, components: &[&str]) -> Href {
        let mut state = self.state();
        let href = state.home.join(&format!("{segment}/"));
        let mut collection = CalendarCollection::new(href.clone());
        collection.display_name = Some(name.to_string());
        collection.supported_components = components.iter().map(|c| c.to_string()).collect();
        state.collections.push(collection);
        href
    }

    /// Stores an object directly, as another client would.
    pub fn put_object(&self, calendar: &Href, filename: &str, text: String) -> Href {
        let mut state = self.state();
        let href = calendar.join(filename);
        let etag = state.next_etag();
        state.objects.push(StoredObject {
            href: href.clone(),
            etag,
            text,
        });
        href
    }

    pub fn reject_login(&self) {
        self.state().reject_login = true;
    }

    /// The next update or delete finds the object changed by someone else.
    pub fn interfere_next_write(&self) {
        self.state().interfere_next_write = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn object_text(&self, href: &Href) -> Option<String> {
        self.state()
            .objects
            .iter()
            .find(|o| o.href == *href)
            .map(|o| o.text.clone())
    }

    pub fn object_etag(&self, href: &Href) -> Option<ETag> {
        self.state()
            .objects
            .iter()
            .find(|o| o.href == *href)
            .map(|o| o.etag.clone())
    }

    pub fn object_count(&self) -> usize {
        self.state().objects.len()
    }
}

/// The UID a filter built by the locator asks for.
fn filtered_uid(filter: &CompFilter) -> Option<String> {
    filter
        .prop_filters
        .iter()
        .filter(|p| p.name == "UID")
        .find_map(|p| p.text_match.as_ref().map(|t| t.text.clone()))
        .or_else(|| filter.comp_filters.iter().find_map(filtered_uid))
}

fn overlaps(text: &str, range: &TimeRange) -> bool {
    match davcal_ical::decode(text) {
        Ok(event) => event.end > range.start && range.end.is_none_or(|end| event.start < end),
        Err(_) => false,
    }
}

/// Matches the raw `UID` line, so objects the codec rejects are still found.
fn has_uid(text: &str, uid: &str) -> bool {
    text.lines()
        .filter_map(|line| line.trim_end_matches('\r').strip_prefix("UID:"))
        .any(|value| value == uid)
}

#[async_trait]
impl Transport for SpyTransport {
    async fn login(&self) -> Result<(), Error> {
        let mut state = self.state();
        state.calls.push(Call::Login);
        if state.reject_login {
            return Err(CalDavError::NotACalDavServer.into());
        }
        Ok(())
    }

    async fn fetch_collections(&self) -> Result<Vec<CalendarCollection>, Error> {
        let mut state = self.state();
        state.calls.push(Call::FetchCollections);
        Ok(state.collections.clone())
    }

    async fn fetch_objects(
        &self,
        collection: &Href,
        time_range: Option<TimeRange>,
        filter: Option<CompFilter>,
    ) -> Result<Vec<RawCalendarObject>, Error> {
        let mut state = self.state();
        state.calls.push(Call::FetchObjects {
            collection: collection.clone(),
            filtered: filter.is_some(),
        });

        let uid = filter.as_ref().and_then(filtered_uid);
        let objects = state
            .objects
            .iter()
            .filter(|o| o.href.starts_with(collection.as_str()))
            .filter(|o| match (&uid, &time_range) {
                (Some(uid), _) => has_uid(&o.text, uid),
                (None, Some(range)) => overlaps(&o.text, range),
                (None, None) => true,
            })
            .map(|o| RawCalendarObject::PropBag {
                href: o.href.clone(),
                getetag: Some(o.etag.clone()),
                calendar_data: Some(o.text.clone()),
            })
            .collect();
        Ok(objects)
    }

    async fn create_object(
        &self,
        collection: &Href,
        filename: &str,
        body: &str,
    ) -> Result<RawCalendarObject, Error> {
        let mut state = self.state();
        state.calls.push(Call::CreateObject {
            collection: collection.clone(),
            filename: filename.to_string(),
        });

        let href = collection.join(filename);
        if state.objects.iter().any(|o| o.href == href) {
            return Err(CalDavError::PreconditionFailed("*".to_string()).into());
        }
        let etag = state.next_etag();
        state.objects.push(StoredObject {
            href: href.clone(),
            etag: etag.clone(),
            text: body.to_string(),
        });

        // Like many servers, answer a create without the representation
        Ok(RawCalendarObject::Inline {
            url: href,
            etag: Some(etag),
            data: None,
        })
    }

    async fn update_object(
        &self,
        object: &Href,
        body: &str,
        etag: Option<&ETag>,
    ) -> Result<RawCalendarObject, Error> {
        let mut state = self.state();
        state.calls.push(Call::UpdateObject {
            object: object.clone(),
            etag: etag.cloned(),
        });

        state.maybe_interfere(object);
        state.check_etag(object, etag)?;
        let new_etag = state.next_etag();
        let stored = state.object_mut(object)?;
        stored.etag = new_etag.clone();
        stored.text = body.to_string();

        Ok(RawCalendarObject::Inline {
            url: object.clone(),
            etag: Some(new_etag),
            data: Some(body.to_string()),
        })
    }

    async fn delete_object(&self, object: &Href, etag: Option<&ETag>) -> Result<(), Error> {
        let mut state = self.state();
        state.calls.push(Call::DeleteObject {
            object: object.clone(),
            etag: etag.cloned(),
        });

        state.maybe_interfere(object);
        state.check_etag(object, etag)?;
        state.objects.retain(|o| o.href != *object);
        Ok(())
    }

    async fn create_collection(&self, href: &Href, props: &CollectionProps) -> Result<(), Error> {
        let mut state = self.state();
        state.calls.push(Call::CreateCollection { href: href.clone() });

        let mut collection = CalendarCollection::new(href.clone());
        collection.display_name = Some(props.display_name.clone());
        collection.description = props.description.clone();
        collection.color = props.color.clone();
        collection.timezone = props.timezone.clone();
        state.collections.push(collection);
        Ok(())
    }

    async fn delete_collection(&self, href: &Href) -> Result<(), Error> {
        let mut state = self.state();
        state.calls.push(Call::DeleteCollection { href: href.clone() });

        if !state.collections.iter().any(|c| c.href == *href) {
            return Err(CalDavError::NotFound(href.clone()).into());
        }
        state.collections.retain(|c| c.href != *href);
        state.objects.retain(|o| !o.href.starts_with(href.as_str()));
        Ok(())
    }

    fn calendar_home(&self) -> Href {
        self.state().home.clone()
    }
}
