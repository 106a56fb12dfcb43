//! Logbook models

use std::fmt;

use chrono::{DateTime, Utc};
use common::Record;
use serde::{Deserialize, Serialize};

/// Kind of captured asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    const VIDEO_EXTENSIONS: [&'static str; 6] = ["mp4", "mov", "m4v", "webm", "avi", "mkv"];

    /// Guess the kind from a file extension; anything unknown is an image
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.to_ascii_lowercase();
        if Self::VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Media entry, as persisted under `capturedMedia`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub id: String,
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Record for MediaEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, _created_at: DateTime<Utc>) {
        self.id = id;
    }
}

/// Result of a reverse-geocoding lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Place {
    /// `"<region>, <country>"`, missing parts left empty
    pub fn label(&self) -> String {
        format!(
            "{}, {}",
            self.region.as_deref().unwrap_or_default(),
            self.country.as_deref().unwrap_or_default()
        )
    }
}

/// Trim a free-text note, treating blank as absent
pub fn normalize_annotation(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_entries_written_by_the_mobile_app() {
        let blob = r#"[
            {"id":"1718000000000","uri":"file:///cache/a.jpg","type":"image",
             "location":{"latitude":4.711,"longitude":-74.0721},"annotation":"Plaza"},
            {"id":"1718000000500","uri":"file:///cache/b.mp4","type":"video",
             "location":null,"annotation":""}
        ]"#;

        let entries: Vec<MediaEntry> = serde_json::from_str(blob).unwrap();
        assert_eq!(entries[0].kind, MediaKind::Image);
        assert_eq!(entries[0].location.map(|l| l.latitude), Some(4.711));
        assert_eq!(entries[1].kind, MediaKind::Video);
        assert_eq!(entries[1].location, None);
        assert_eq!(entries[1].annotation.as_deref(), Some(""));
    }

    #[test]
    fn test_kind_is_stored_under_type() {
        let entry = MediaEntry {
            id: "1".to_string(),
            uri: "file:///a.jpg".to_string(),
            kind: MediaKind::Image,
            location: None,
            annotation: None,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "image");
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_place_label_keeps_missing_parts_empty() {
        let place = Place {
            region: Some("Cundinamarca".to_string()),
            country: None,
        };
        assert_eq!(place.label(), "Cundinamarca, ");
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(MediaKind::from_extension("MOV"), MediaKind::Video);
        assert_eq!(MediaKind::from_extension("jpeg"), MediaKind::Image);
    }
}
