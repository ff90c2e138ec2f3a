// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! XML utilities for WebDAV/CalDAV processing.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::Event;

/// XML namespaces used in `CalDAV`.
pub mod ns {
    /// `WebDAV` namespace.
    pub const DAV: &str = "DAV:";

    /// `CalDAV` namespace.
    pub const CALDAV: &str = "urn:ietf:params:xml:ns:caldav";

    /// Apple iCal namespace, home of `calendar-color`.
    pub const APPLE: &str = "http://apple.com/ns/ical/";
}

/// Reads the text content of the element whose start tag was just consumed.
///
/// Text and CDATA sections are concatenated; nested elements are skipped. The
/// reader is left after the matching end tag.
///
/// # Errors
///
/// Returns an error if XML parsing fails.
pub fn read_element_text<R: BufRead>(reader: &mut Reader<R>) -> Result<String, quick_xml::Error> {
    let mut text = String::new();
    let mut depth = 1;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Text(e) => {
                let unescaped = e.unescape()?;
                text.push_str(unescaped.as_ref());
            }
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

/// Local name of an element, without namespace prefix.
pub fn local_name(name: quick_xml::name::QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().into_inner()).into_owned()
}
