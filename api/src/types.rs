// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

/// Backend identifier of an event.
///
/// The backend may hand ids out as strings or numbers, both are kept as their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new `EventId` from a string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for EventId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// An event as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventRecord {
    /// Backend id, absent on records that were never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,

    /// Title of the event.
    pub header: String,

    /// Free text description.
    #[serde(default)]
    pub description: String,

    /// Date in the backend's `YYYY-M-D` form.
    pub date: String,

    /// Time of day as `HH:MM`.
    #[serde(alias = "timeString")]
    pub time: String,
}

/// The payload sent on create and update. It never carries an id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EventDraft {
    /// Title of the event.
    pub header: String,

    /// Free text description.
    pub description: String,

    /// Date in the backend's `YYYY-M-D` form.
    pub date: String,

    /// Time of day as `HH:MM`.
    pub time: String,
}

/// A user and the events they own.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserRecord {
    /// Login name, also used as the path key on the backend.
    pub username: String,

    /// Events owned by the user.
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl UserRecord {
    /// Finds one of the user's events by id.
    #[must_use]
    pub fn find_event(&self, id: &EventId) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.id.as_ref() == Some(id))
    }
}
