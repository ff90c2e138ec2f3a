// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request builders for `CalDAV` operations.

use std::io::Cursor;

use jiff::Timestamp;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::CalDavError;
use crate::types::CollectionProps;
use crate::xml::ns;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// PROPFIND request builder.
#[derive(Debug)]
pub struct PropFindRequest {
    props: Vec<Prop>,
}

/// Properties to request in PROPFIND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    /// Display name.
    DisplayName,
    /// Resource type.
    ResourceType,
    /// `ETag`.
    GetETag,
    /// Calendar data.
    CalendarData,
    /// Calendar home set.
    CalendarHomeSet,
    /// Supported calendar components.
    SupportedCalendarComponents,
    /// Calendar description.
    CalendarDescription,
    /// Calendar time zone identifier (RFC 7809).
    CalendarTimezoneId,
    /// Calendar color (Apple extension).
    CalendarColor,
}

/// Namespaces a property can live in, with the prefix used when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Dav,
    CalDav,
    Apple,
}

impl Namespace {
    const ALL: [Self; 3] = [Self::Dav, Self::CalDav, Self::Apple];

    const fn prefix(self) -> &'static str {
        match self {
            Self::Dav => "D",
            Self::CalDav => "C",
            Self::Apple => "A",
        }
    }

    const fn uri(self) -> &'static str {
        match self {
            Self::Dav => ns::DAV,
            Self::CalDav => ns::CALDAV,
            Self::Apple => ns::APPLE,
        }
    }
}

impl Prop {
    const fn name(self) -> &'static str {
        match self {
            Self::DisplayName => "displayname",
            Self::ResourceType => "resourcetype",
            Self::GetETag => "getetag",
            Self::CalendarData => "calendar-data",
            Self::CalendarHomeSet => "calendar-home-set",
            Self::SupportedCalendarComponents => "supported-calendar-component-set",
            Self::CalendarDescription => "calendar-description",
            Self::CalendarTimezoneId => "calendar-timezone-id",
            Self::CalendarColor => "calendar-color",
        }
    }

    const fn namespace(self) -> Namespace {
        match self {
            Self::DisplayName | Self::ResourceType | Self::GetETag => Namespace::Dav,
            Self::CalendarColor => Namespace::Apple,
            Self::CalendarData
            | Self::CalendarHomeSet
            | Self::SupportedCalendarComponents
            | Self::CalendarDescription
            | Self::CalendarTimezoneId => Namespace::CalDav,
        }
    }

    fn tag(self) -> String {
        format!("{}:{}", self.namespace().prefix(), self.name())
    }
}

impl PropFindRequest {
    /// Creates a new PROPFIND request.
    #[must_use]
    pub fn new() -> Self {
        Self { props: Vec::new() }
    }

    /// Adds a property to the request.
    pub fn add_property(&mut self, prop: Prop) -> &mut Self {
        self.props.push(prop);
        self
    }

    /// Builds the XML body for the PROPFIND request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, CalDavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <D:propfind xmlns:D="DAV:" ...>
        let mut propfind = BytesStart::new("D:propfind");
        for namespace in Namespace::ALL {
            if namespace == Namespace::Dav || self.props.iter().any(|p| p.namespace() == namespace)
            {
                propfind.push_attribute((
                    format!("xmlns:{}", namespace.prefix()).as_str(),
                    namespace.uri(),
                ));
            }
        }
        writer.write_event(Event::Start(propfind))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        for prop in &self.props {
            writer.write_event(Event::Empty(BytesStart::new(prop.tag())))?;
        }
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        writer.write_event(Event::End(BytesEnd::new("D:propfind")))?;
        finish(writer)
    }
}

impl Default for PropFindRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Time range filter for calendar queries. Bounds are written in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Start date/time, inclusive.
    pub start: Timestamp,
    /// End date/time, exclusive. Open-ended if `None`.
    pub end: Option<Timestamp>,
}

impl TimeRange {
    /// Creates a bounded time range.
    #[must_use]
    pub const fn new(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut time_range = BytesStart::new("C:time-range");
        time_range.push_attribute(("start", format_utc(self.start).as_str()));
        if let Some(end) = self.end {
            time_range.push_attribute(("end", format_utc(end).as_str()));
        }
        writer.write_event(Event::Empty(time_range))?;
        Ok(())
    }
}

fn format_utc(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y%m%dT%H%M%SZ").to_string()
}

/// How the child filters of a filter element combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTest {
    /// Any child filter must match.
    AnyOf,
    /// All child filters must match.
    AllOf,
}

impl FilterTest {
    const fn as_str(self) -> &'static str {
        match self {
            Self::AnyOf => "anyof",
            Self::AllOf => "allof",
        }
    }
}

/// Match type of a `text-match` element (RFC 4790 section 4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Whole value equals the text.
    Equals,
    /// Value contains the text.
    Contains,
    /// Value starts with the text.
    StartsWith,
    /// Value ends with the text.
    EndsWith,
}

impl MatchType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::StartsWith => "starts-with",
            Self::EndsWith => "ends-with",
        }
    }
}

/// Text match filter for calendar queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    /// Text to search for.
    pub text: String,
    /// Collation to use, `i;ascii-casemap` on the server if unset.
    pub collation: Option<String>,
    /// How the text is compared, `contains` on the server if unset.
    pub match_type: Option<MatchType>,
    /// Whether to negate the match.
    pub negate: bool,
}

impl TextMatch {
    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut text_match = BytesStart::new("C:text-match");
        if let Some(collation) = &self.collation {
            text_match.push_attribute(("collation", collation.as_str()));
        }
        if let Some(match_type) = self.match_type {
            text_match.push_attribute(("match-type", match_type.as_str()));
        }
        if self.negate {
            text_match.push_attribute(("negate-condition", "yes"));
        }
        writer.write_event(Event::Start(text_match))?;
        writer.write_event(Event::Text(BytesText::new(&self.text)))?;
        writer.write_event(Event::End(BytesEnd::new("C:text-match")))?;
        Ok(())
    }
}

/// A `prop-filter` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropFilter {
    /// Property name, e.g. `UID`.
    pub name: String,
    /// Combination of child filters.
    pub test: Option<FilterTest>,
    /// Text the property value must match.
    pub text_match: Option<TextMatch>,
}

impl PropFilter {
    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut prop_filter = BytesStart::new("C:prop-filter");
        prop_filter.push_attribute(("name", self.name.as_str()));
        if let Some(test) = self.test {
            prop_filter.push_attribute(("test", test.as_str()));
        }

        match &self.text_match {
            Some(text_match) => {
                writer.write_event(Event::Start(prop_filter))?;
                text_match.write(writer)?;
                writer.write_event(Event::End(BytesEnd::new("C:prop-filter")))?;
            }
            None => writer.write_event(Event::Empty(prop_filter))?,
        }
        Ok(())
    }
}

/// A `comp-filter` element, possibly nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompFilter {
    /// Component name, e.g. `VCALENDAR` or `VEVENT`.
    pub name: String,
    /// Combination of child filters.
    pub test: Option<FilterTest>,
    /// Time range the component must overlap.
    pub time_range: Option<TimeRange>,
    /// Property filters.
    pub prop_filters: Vec<PropFilter>,
    /// Nested component filters.
    pub comp_filters: Vec<CompFilter>,
}

impl CompFilter {
    /// Creates a filter matching any component called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test: None,
            time_range: None,
            prop_filters: Vec::new(),
            comp_filters: Vec::new(),
        }
    }

    /// Sets how child filters combine.
    #[must_use]
    pub const fn test(mut self, test: FilterTest) -> Self {
        self.test = Some(test);
        self
    }

    /// Sets the time range filter.
    #[must_use]
    pub const fn time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = Some(time_range);
        self
    }

    /// Adds a property filter.
    #[must_use]
    pub fn prop_filter(mut self, filter: PropFilter) -> Self {
        self.prop_filters.push(filter);
        self
    }

    /// Adds a nested component filter.
    #[must_use]
    pub fn comp_filter(mut self, filter: CompFilter) -> Self {
        self.comp_filters.push(filter);
        self
    }

    fn write(&self, writer: &mut XmlWriter) -> Result<(), CalDavError> {
        let mut comp_filter = BytesStart::new("C:comp-filter");
        comp_filter.push_attribute(("name", self.name.as_str()));
        if let Some(test) = self.test {
            comp_filter.push_attribute(("test", test.as_str()));
        }

        if self.time_range.is_none() && self.prop_filters.is_empty() && self.comp_filters.is_empty()
        {
            writer.write_event(Event::Empty(comp_filter))?;
            return Ok(());
        }

        writer.write_event(Event::Start(comp_filter))?;
        if let Some(time_range) = &self.time_range {
            time_range.write(writer)?;
        }
        for prop_filter in &self.prop_filters {
            prop_filter.write(writer)?;
        }
        for comp_filter in &self.comp_filters {
            comp_filter.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("C:comp-filter")))?;
        Ok(())
    }
}

/// Calendar query request builder.
#[derive(Debug)]
pub struct CalendarQueryRequest {
    time_range: Option<TimeRange>,
    component: Option<String>,
    filter: Option<CompFilter>,
}

impl CalendarQueryRequest {
    /// Creates a new calendar query request matching every calendar object.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time_range: None,
            component: None,
            filter: None,
        }
    }

    /// Sets the time range filter, applied to the component filter.
    #[must_use]
    pub const fn time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = Some(time_range);
        self
    }

    /// Sets the component filter (VEVENT, VTODO, etc.).
    #[must_use]
    pub fn component(mut self, component: String) -> Self {
        self.component = Some(component);
        self
    }

    /// Uses `filter` as the top-level `comp-filter`, replacing the filter
    /// derived from [`Self::component`] and [`Self::time_range`].
    #[must_use]
    pub fn filter(mut self, filter: CompFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    fn root_filter(&self) -> CompFilter {
        if let Some(filter) = &self.filter {
            return filter.clone();
        }

        let root = CompFilter::new("VCALENDAR");
        match &self.component {
            Some(component) => {
                let mut inner = CompFilter::new(component.as_str());
                inner.time_range = self.time_range;
                root.comp_filter(inner)
            }
            None => root,
        }
    }

    /// Builds the XML body for the calendar query request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, CalDavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <C:calendar-query xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
        let mut calendar_query = BytesStart::new("C:calendar-query");
        calendar_query.push_attribute(("xmlns:D", ns::DAV));
        calendar_query.push_attribute(("xmlns:C", ns::CALDAV));
        writer.write_event(Event::Start(calendar_query))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        writer.write_event(Event::Empty(BytesStart::new("D:getetag")))?;
        writer.write_event(Event::Empty(BytesStart::new("C:calendar-data")))?;
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        writer.write_event(Event::Start(BytesStart::new("C:filter")))?;
        self.root_filter().write(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("C:filter")))?;

        writer.write_event(Event::End(BytesEnd::new("C:calendar-query")))?;
        finish(writer)
    }
}

impl Default for CalendarQueryRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// MKCALENDAR request builder (RFC 4791 section 5.3.1).
#[derive(Debug)]
pub struct MkCalendarRequest<'a> {
    props: &'a CollectionProps,
}

impl<'a> MkCalendarRequest<'a> {
    /// Creates a request setting `props` on the new collection.
    #[must_use]
    pub const fn new(props: &'a CollectionProps) -> Self {
        Self { props }
    }

    /// Builds the XML body for the MKCALENDAR request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, CalDavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <C:mkcalendar xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
        let mut mkcalendar = BytesStart::new("C:mkcalendar");
        mkcalendar.push_attribute(("xmlns:D", ns::DAV));
        mkcalendar.push_attribute(("xmlns:C", ns::CALDAV));
        if self.props.color.is_some() {
            mkcalendar.push_attribute(("xmlns:A", ns::APPLE));
        }
        writer.write_event(Event::Start(mkcalendar))?;

        writer.write_event(Event::Start(BytesStart::new("D:set")))?;
        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;

        write_text_element(&mut writer, "D:displayname", &self.props.display_name)?;
        if let Some(description) = &self.props.description {
            write_text_element(&mut writer, "C:calendar-description", description)?;
        }
        if let Some(color) = &self.props.color {
            write_text_element(&mut writer, "A:calendar-color", color)?;
        }
        if let Some(timezone) = &self.props.timezone {
            write_text_element(&mut writer, "C:calendar-timezone-id", timezone)?;
        }

        // Events only
        writer.write_event(Event::Start(BytesStart::new(
            "C:supported-calendar-component-set",
        )))?;
        let mut comp = BytesStart::new("C:comp");
        comp.push_attribute(("name", "VEVENT"));
        writer.write_event(Event::Empty(comp))?;
        writer.write_event(Event::End(BytesEnd::new(
            "C:supported-calendar-component-set",
        )))?;

        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;
        writer.write_event(Event::End(BytesEnd::new("D:set")))?;

        writer.write_event(Event::End(BytesEnd::new("C:mkcalendar")))?;
        finish(writer)
    }
}

fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), CalDavError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn finish(writer: XmlWriter) -> Result<String, CalDavError> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| CalDavError::Xml(format!("UTF-8 error: {e}")))
}
