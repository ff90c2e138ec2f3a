// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsers for WebDAV/CalDAV operations.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::CalDavError;
use crate::types::{CalendarCollection, ETag, Href, RawCalendarObject};
use crate::xml::{local_name, read_element_text};

/// `WebDAV` multistatus response.
#[derive(Debug, Clone, Default)]
pub struct MultiStatusResponse {
    /// The response items.
    pub responses: Vec<ResponseItem>,
}

/// Individual response in multistatus.
#[derive(Debug, Clone, Default)]
pub struct ResponseItem {
    /// The href the response is about.
    pub href: Href,
    /// Property groups by status.
    pub prop_stats: Vec<PropStat>,
    /// Status of the whole response, if given instead of propstats.
    pub status: Option<String>,
}

/// Property stat with status and value.
#[derive(Debug, Clone, Default)]
pub struct PropStat {
    /// The properties.
    pub props: Properties,
    /// The HTTP status line, e.g. `HTTP/1.1 200 OK`.
    pub status: String,
}

impl PropStat {
    /// Whether the status line reports success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.split_whitespace().nth(1) == Some("200")
    }
}

/// WebDAV/CalDAV properties.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    /// `D:displayname`.
    pub display_name: Option<String>,
    /// `D:getetag`.
    pub get_etag: Option<ETag>,
    /// `C:calendar-data`.
    pub calendar_data: Option<String>,
    /// `C:calendar-home-set`.
    pub calendar_home_set: Option<Href>,
    /// `C:supported-calendar-component-set`.
    pub supported_calendar_components: Option<Vec<String>>,
    /// `C:calendar-description`.
    pub calendar_description: Option<String>,
    /// `C:calendar-timezone-id`.
    pub calendar_timezone_id: Option<String>,
    /// `A:calendar-color`.
    pub calendar_color: Option<String>,
    /// Resource type contains `C:calendar`.
    pub is_calendar: bool,
    /// Resource type contains `D:collection`.
    pub is_collection: bool,
}

impl MultiStatusResponse {
    /// Parses multistatus response from XML.
    ///
    /// # Errors
    ///
    /// Returns an error if XML parsing fails.
    pub fn from_xml(xml: &str) -> Result<Self, CalDavError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        reader.config_mut().check_end_names = true;

        let mut responses = Vec::new();
        let mut current_response: Option<ResponseItem> = None;
        let mut current_propstat: Option<PropStat> = None;
        let mut in_prop = false;

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Eof => break,
                Event::Start(ref e) => {
                    let name = local_name(e.name());
                    if name == "response" {
                        current_response = Some(ResponseItem::default());
                    } else if let Some(response) = current_response.as_mut() {
                        match name.as_str() {
                            "propstat" => current_propstat = Some(PropStat::default()),
                            "prop" if current_propstat.is_some() => in_prop = true,
                            "status" if !in_prop => {
                                let status = read_element_text(&mut reader)?;
                                match current_propstat.as_mut() {
                                    Some(propstat) => propstat.status = status,
                                    None => response.status = Some(status),
                                }
                            }
                            "href" if current_propstat.is_none() => {
                                response.href = Href::new(read_element_text(&mut reader)?);
                            }
                            _ if in_prop => {
                                if let Some(propstat) = current_propstat.as_mut() {
                                    read_property(&mut reader, &name, &mut propstat.props)?;
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::End(ref e) => match local_name(e.name()).as_str() {
                    "response" => {
                        if let Some(response) = current_response.take() {
                            responses.push(response);
                        }
                    }
                    "propstat" => {
                        if let (Some(response), Some(propstat)) =
                            (current_response.as_mut(), current_propstat.take())
                        {
                            response.prop_stats.push(propstat);
                        }
                    }
                    "prop" => in_prop = false,
                    _ => {}
                },
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { responses })
    }

    /// Converts the responses of a calendar query to calendar objects.
    ///
    /// Only successful propstats are considered; resources without calendar
    /// data are kept and left to the caller.
    #[must_use]
    pub fn into_objects(self) -> Vec<RawCalendarObject> {
        let mut objects = Vec::new();
        for response in self.responses {
            for prop_stat in response.prop_stats {
                if !prop_stat.is_ok() {
                    continue;
                }
                objects.push(RawCalendarObject::PropBag {
                    href: response.href.clone(),
                    getetag: prop_stat.props.get_etag,
                    calendar_data: prop_stat.props.calendar_data,
                });
            }
        }
        objects
    }

    /// Converts multistatus response to calendar collections.
    #[must_use]
    pub fn into_collections(self) -> Vec<CalendarCollection> {
        let mut collections = Vec::new();

        for response in self.responses {
            for prop_stat in response.prop_stats {
                // Only include if it's a calendar collection
                if prop_stat.is_ok() && prop_stat.props.is_calendar && prop_stat.props.is_collection
                {
                    let props = prop_stat.props;
                    collections.push(CalendarCollection {
                        href: response.href.clone(),
                        display_name: props.display_name,
                        description: props.calendar_description,
                        color: props.calendar_color,
                        timezone: props.calendar_timezone_id,
                        supported_components: props
                            .supported_calendar_components
                            .unwrap_or_default(),
                    });
                }
            }
        }

        collections
    }

    /// The first calendar home set found in a successful propstat.
    #[must_use]
    pub fn calendar_home_set(&self) -> Option<Href> {
        self.responses.iter().find_map(|r| {
            r.prop_stats
                .iter()
                .filter(|p| p.is_ok())
                .find_map(|p| p.props.calendar_home_set.clone())
        })
    }
}

/// Reads one property element whose start tag was just consumed.
fn read_property<R: BufRead>(
    reader: &mut Reader<R>,
    name: &str,
    props: &mut Properties,
) -> Result<(), CalDavError> {
    match name {
        "displayname" => props.display_name = Some(read_element_text(reader)?),
        "getetag" => props.get_etag = Some(ETag::new(read_element_text(reader)?)),
        "calendar-data" => props.calendar_data = Some(read_element_text(reader)?),
        "calendar-description" => props.calendar_description = Some(read_element_text(reader)?),
        "calendar-timezone-id" => props.calendar_timezone_id = Some(read_element_text(reader)?),
        "calendar-color" => props.calendar_color = Some(read_element_text(reader)?),
        "resourcetype" => {
            props.is_collection = false;
            for child in read_children(reader, "resourcetype")? {
                match child.0.as_str() {
                    "collection" => props.is_collection = true,
                    "calendar" => props.is_calendar = true,
                    _ => {}
                }
            }
        }
        "calendar-home-set" => {
            props.calendar_home_set = read_children(reader, "calendar-home-set")?
                .into_iter()
                .find(|(child, _)| child == "href")
                .and_then(|(_, text)| text)
                .map(Href::new);
        }
        "supported-calendar-component-set" => {
            let mut components = Vec::new();
            let mut buf = Vec::new();
            loop {
                match reader.read_event_into(&mut buf)? {
                    Event::End(ref e) if local_name(e.name()) == name => break,
                    Event::Start(ref e) | Event::Empty(ref e)
                        if local_name(e.name()) == "comp" =>
                    {
                        if let Ok(Some(attr)) = e.try_get_attribute("name") {
                            components.push(attr.unescape_value()?.into_owned());
                        }
                    }
                    Event::Eof => return Err(CalDavError::Xml("Unexpected EOF".to_string())),
                    _ => {}
                }
                buf.clear();
            }
            props.supported_calendar_components = Some(components);
        }
        // Unknown property, skip its content
        _ => {
            read_element_text(reader)?;
        }
    }
    Ok(())
}

/// Reads the direct children of the element `parent`, returning their local
/// names and, for elements with content, their text.
fn read_children<R: BufRead>(
    reader: &mut Reader<R>,
    parent: &str,
) -> Result<Vec<(String, Option<String>)>, CalDavError> {
    let mut children = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::End(ref e) if local_name(e.name()) == parent => break,
            Event::Start(ref e) => {
                let name = local_name(e.name());
                let text = read_element_text(reader)?;
                children.push((name, Some(text)));
            }
            Event::Empty(ref e) => children.push((local_name(e.name()), None)),
            Event::Eof => return Err(CalDavError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(children)
}
