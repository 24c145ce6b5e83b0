//! Calendar events and the ordered collection that holds them.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::interval::{Interval, Spanning};

/// One scheduled calendar entry (a class, a lecture). Immutable once
/// parsed; discarded wholesale when a new feed is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub interval: Interval,
    pub summary: String,
    pub location: String,
}

impl Event {
    pub fn new(
        summary: impl Into<String>,
        location: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Event {
            interval: Interval::new(start, end),
            summary: summary.into(),
            location: location.into(),
        }
    }
}

impl Spanning for Event {
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

/// An ordered sequence of events, sorted ascending by start instant.
/// The sort order is an invariant: every constructor sorts, and the
/// sort is stable so equal starts keep their feed order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calendar {
    events: Vec<Event>,
}

impl Calendar {
    pub fn from_events(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.interval.start);
        Calendar { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
