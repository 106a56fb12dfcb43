//! Event form controller
//!
//! Holds what the user has entered so far, validates it in a fixed order
//! and produces the normalized event handed to the record store.

use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use common::ValidationError;
use common::validation::{first_violation, is_present};
use regex::Regex;

use crate::models::{Event, EventCategory};
use crate::validation::EVENT_RULES;

/// Format a time of day the way the time picker displays it (`03:30 PM`)
pub fn format_time_display(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Parse a stored display time back into a time of day
///
/// Accepts 12-hour forms with any spelling of the meridiem (`03:30 PM`,
/// `3:30 p. m.`) and 24-hour forms (`15:30`).
pub fn parse_time_display(display: &str) -> Option<NaiveTime> {
    static TIME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TIME_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(\d{1,2}):(\d{2})(?::\d{2})?\s*(?:([aApP])\.?\s*[mM]\.?)?\s*$")
            .expect("Failed to compile time regex")
    });

    let captures = regex.captures(display)?;
    let hour: u32 = captures[1].parse().ok()?;
    let minute: u32 = captures[2].parse().ok()?;

    let hour = match captures.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            if meridiem == "p" { hour % 12 + 12 } else { hour % 12 }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Event being created or edited
#[derive(Debug, Clone)]
pub struct EventForm {
    pub title: String,
    pub category: Option<EventCategory>,
    pub participants: String,
    pub date: DateTime<Utc>,
    time: Option<String>,
    time_of_day: NaiveTime,
    editing: Option<Editing>,
}

#[derive(Debug, Clone)]
struct Editing {
    id: String,
    created_at: Option<DateTime<Utc>>,
}

impl EventForm {
    /// Blank form for a new event, dated `now`
    ///
    /// The time picker starts at the wall-clock time of `now` in its own
    /// time zone.
    pub fn new<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        Self {
            title: String::new(),
            category: None,
            participants: String::new(),
            date: now.with_timezone(&Utc),
            time: None,
            time_of_day: now.naive_local().time(),
            editing: None,
        }
    }

    /// Form prefilled from an existing event
    pub fn for_event(event: &Event) -> Self {
        let time_of_day = parse_time_display(&event.time).unwrap_or_else(|| Local::now().time());
        Self {
            title: event.title.clone(),
            category: Some(event.category),
            participants: event.participants.clone().unwrap_or_default(),
            date: event.date,
            time: Some(event.time.clone()).filter(|t| !t.is_empty()),
            time_of_day,
            editing: Some(Editing {
                id: event.id.clone(),
                created_at: event.created_at,
            }),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Selected display time, if any
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Current value of the time picker
    pub fn time_of_day(&self) -> NaiveTime {
        self.time_of_day
    }

    pub fn select_category(&mut self, category: EventCategory) {
        self.category = Some(category);
    }

    pub fn select_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    /// Pick a time; the display string is computed once here
    pub fn select_time(&mut self, time: NaiveTime) {
        self.time_of_day = time;
        self.time = Some(format_time_display(time));
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        first_violation(EVENT_RULES, self)
    }

    /// Validate and build the normalized event
    ///
    /// New events carry an empty id; the record store assigns one on upsert.
    pub fn submit(&self) -> Result<Event, ValidationError> {
        self.validate()?;

        let (id, created_at) = match &self.editing {
            Some(editing) => (editing.id.clone(), editing.created_at),
            None => (String::new(), None),
        };

        Ok(Event {
            id,
            title: self.title.clone(),
            // Checked by the category rule above
            category: self.category.unwrap_or(EventCategory::Other),
            participants: Some(self.participants.trim().to_string()).filter(|p| is_present(p)),
            date: self.date,
            time: self.time.clone().unwrap_or_default(),
            created_at,
        })
    }
}
