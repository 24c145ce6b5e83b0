//! Day and week windowing relative to a reference instant.
//!
//! Everything here is a pure function of `(now, items)`; the anchor
//! offset rides along inside the `DateTime<FixedOffset>` values, so no
//! ambient time zone state exists anywhere.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::interval::{Interval, Spanning};

/// The most recent Sunday relative to `now`, at 23:59.
///
/// A Sunday input maps to the *previous* Sunday, so the week window
/// always opens strictly before the reference day.
pub fn week_start(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    // Monday is 1, Sunday is 7: subtracting always lands on a Sunday
    let days_back = i64::from(now.weekday().number_from_monday());
    let sunday = (now - Duration::days(days_back)).date_naive();

    // Unwraps are safe: 23:59 is a valid wall time and a fixed offset
    // maps every wall time to exactly one instant
    sunday
        .and_hms_opt(23, 59, 0)
        .unwrap()
        .and_local_timezone(*now.offset())
        .single()
        .unwrap()
}

/// The week containing `now`: `[week_start, week_start + 7 days]`.
pub fn week_window(now: DateTime<FixedOffset>) -> Interval {
    let start = week_start(now);
    Interval::new(start, start + Duration::days(7))
}

/// The calendar day containing `now`: `[midnight, 23:59]`.
pub fn day_window(now: DateTime<FixedOffset>) -> Interval {
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(*now.offset())
        .single()
        .unwrap();
    Interval::new(midnight, midnight + Duration::hours(23) + Duration::minutes(59))
}

/// Items whose *start* lies within the window, re-sorted by start.
/// Works on events and breaks alike.
pub fn filter_into<T: Spanning + Clone>(window: &Interval, items: &[T]) -> Vec<T> {
    let mut selected: Vec<T> = items
        .iter()
        .filter(|item| window.contains(item.start()))
        .cloned()
        .collect();
    selected.sort_by_key(|item| item.start());
    selected
}

/// One event in the weekly agenda wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub summary: String,
    pub location: String,
    pub start: String,
    pub end: String,
}

impl AgendaEntry {
    fn from_event(event: &Event) -> Self {
        AgendaEntry {
            summary: event.summary.clone(),
            location: event.location.clone(),
            start: event.interval.start.format("%H:%M").to_string(),
            end: event.interval.end.format("%H:%M").to_string(),
        }
    }
}

/// A week of events grouped into day-of-week buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekAgenda {
    pub monday: Vec<AgendaEntry>,
    pub tuesday: Vec<AgendaEntry>,
    pub wednesday: Vec<AgendaEntry>,
    pub thursday: Vec<AgendaEntry>,
    pub friday: Vec<AgendaEntry>,
    pub saturday: Vec<AgendaEntry>,
    pub sunday: Vec<AgendaEntry>,
}

/// Group events into the seven weekday buckets, keyed by the weekday of
/// each event's start. An event that starts and ends on different
/// weekdays is dropped from this per-day view.
pub fn to_weekly_agenda(events: &[Event]) -> WeekAgenda {
    let mut agenda = WeekAgenda::default();

    for event in events {
        if event.start().weekday() != event.end().weekday() {
            continue;
        }

        let bucket = match event.start().weekday() {
            Weekday::Mon => &mut agenda.monday,
            Weekday::Tue => &mut agenda.tuesday,
            Weekday::Wed => &mut agenda.wednesday,
            Weekday::Thu => &mut agenda.thursday,
            Weekday::Fri => &mut agenda.friday,
            Weekday::Sat => &mut agenda.saturday,
            Weekday::Sun => &mut agenda.sunday,
        };
        bucket.push(AgendaEntry::from_event(event));
    }

    agenda
}
