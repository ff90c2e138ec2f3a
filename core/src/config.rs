// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use davcal_ical::Organizer;

/// The default domain part of generated UIDs.
pub const DEFAULT_UID_NAMESPACE: &str = "davcal";

/// Configuration of the event operations.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Domain part of generated UIDs, as in `<millis>-<uuid>@<namespace>`.
    pub uid_namespace: String,

    /// Address of the organizer set on new events.
    pub organizer_email: Option<String>,

    /// Common name of the organizer.
    pub organizer_name: Option<String>,

    /// If true, updates and deletes only succeed if the object is unchanged
    /// since it was read.
    pub etag_precondition: bool,
}

impl CoreConfig {
    /// The organizer derived from the configured identity, if any.
    #[must_use]
    pub fn organizer(&self) -> Option<Organizer> {
        self.organizer_email
            .as_ref()
            .map(|email| Organizer::new(email.clone(), self.organizer_name.clone()))
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            uid_namespace: DEFAULT_UID_NAMESPACE.to_string(),
            organizer_email: None,
            organizer_name: None,
            etag_precondition: true,
        }
    }
}
