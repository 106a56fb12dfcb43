//! Event model and related functionality

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::Record;
use serde::{Deserialize, Serialize};

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "reunion")]
    Meeting,
    #[serde(rename = "estudio")]
    Study,
    #[serde(rename = "personal")]
    Personal,
    #[serde(rename = "otro")]
    Other,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Meeting,
        EventCategory::Study,
        EventCategory::Personal,
        EventCategory::Other,
    ];

    /// Value stored on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "reunion",
            EventCategory::Study => "estudio",
            EventCategory::Personal => "personal",
            EventCategory::Other => "otro",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "Meeting",
            EventCategory::Study => "Study",
            EventCategory::Personal => "Personal",
            EventCategory::Other => "Other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EventCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted || c.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown category `{}` (expected one of: reunion, estudio, personal, otro)",
                    s
                )
            })
    }
}

/// Event entity, as persisted under `@events_<userId>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<String>,
    pub date: DateTime<Utc>,
    /// Display string, e.g. `03:30 PM`
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = Some(created_at);
    }
}
