// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use davcal_caldav::CalDavError;
use davcal_ical::DecodeError;

/// What kind of thing could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// A calendar, looked up by display name.
    Calendar,
    /// An event, looked up by UID.
    Event,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar => write!(f, "calendar"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// Errors of calendar and event operations.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A calendar name or event UID did not resolve.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Calendar or event.
        kind: NotFoundKind,
        /// The name or UID that was looked up.
        key: String,
    },

    /// Malformed input, rejected before any network call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server state does not allow the operation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Network, authentication or server failure.
    #[error("{0}")]
    Transport(String),

    /// The server returned calendar data that could not be decoded.
    #[error("invalid calendar data: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    pub(crate) fn calendar_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Calendar,
            key: name.to_string(),
        }
    }

    pub(crate) fn event_not_found(uid: &str) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Event,
            key: uid.to_string(),
        }
    }

    /// A stable machine-readable name of the error class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<CalDavError> for Error {
    fn from(e: CalDavError) -> Self {
        match e {
            CalDavError::PreconditionFailed(_) => {
                Self::Conflict(format!("object was modified on the server ({e})"))
            }
            e => Self::Transport(e.to_string()),
        }
    }
}
