//! Agenda list presenter
//!
//! Events are split into past, today and future by calendar day and shown
//! today first, then future, then past. Order inside a bucket is the stored
//! order.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::Event;

/// Display bucket of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Past,
    Today,
    Future,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Bucket::Past => "past",
            Bucket::Today => "today",
            Bucket::Future => "future",
        })
    }
}

/// An event with the bucket it was assigned to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgendaItem<'a> {
    pub bucket: Bucket,
    pub event: &'a Event,
}

/// Bucket of `date`, comparing calendar days in the time zone of `now`
pub fn bucket_for<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> Bucket {
    let day = date.with_timezone(&now.timezone()).date_naive();
    match day.cmp(&now.date_naive()) {
        Ordering::Less => Bucket::Past,
        Ordering::Equal => Bucket::Today,
        Ordering::Greater => Bucket::Future,
    }
}

/// Stable partition of `events` in display order
pub fn partition<'a, Tz: TimeZone>(events: &'a [Event], now: &DateTime<Tz>) -> Vec<AgendaItem<'a>> {
    let mut today = Vec::new();
    let mut future = Vec::new();
    let mut past = Vec::new();

    for event in events {
        let bucket = bucket_for(&event.date, now);
        let item = AgendaItem { bucket, event };
        match bucket {
            Bucket::Today => today.push(item),
            Bucket::Future => future.push(item),
            Bucket::Past => past.push(item),
        }
    }

    today.extend(future);
    today.extend(past);
    today
}
