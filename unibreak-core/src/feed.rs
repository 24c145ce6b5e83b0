//! Feed parsing using the icalendar crate's parser.
//!
//! Turns raw calendar-feed bytes into a [`Calendar`] of porcelain
//! [`Event`]s, throwing away everything else the feed carries. Retrieval
//! of the bytes is the caller's responsibility; this module never does
//! I/O.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

use crate::error::{CalendarError, CalendarResult};
use crate::event::{Calendar, Event};

/// Parse raw feed bytes into an ordered calendar.
///
/// Empty input is reported as [`CalendarError::Empty`], distinct from
/// malformed input ([`CalendarError::Parse`]): "no calendar yet" is a
/// valid classifier state, a broken feed is a terminal failure.
///
/// Timestamps without an explicit offset are interpreted in `anchor`;
/// timestamps with one are converted to it, so every event the engine
/// sees lives on a single timeline.
pub fn parse_feed(bytes: &[u8], anchor: FixedOffset) -> CalendarResult<Calendar> {
    if bytes.is_empty() {
        return Err(CalendarError::Empty);
    }

    let content = std::str::from_utf8(bytes)
        .map_err(|e| CalendarError::Parse(format!("Feed is not valid UTF-8: {}", e)))?;

    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CalendarError::Parse(e.to_string()))?;

    let mut events = Vec::new();
    for vevent in calendar.components.iter().filter(|c| c.name == "VEVENT") {
        let summary = vevent
            .find_prop("SUMMARY")
            .map(|p| p.val.to_string())
            .unwrap_or_default();
        let location = vevent
            .find_prop("LOCATION")
            .map(|p| p.val.to_string())
            .unwrap_or_default();

        let start = prop_to_instant(vevent, "DTSTART", anchor)?;
        let end = prop_to_instant(vevent, "DTEND", anchor)?;

        events.push(Event::new(summary, location, start, end));
    }

    tracing::debug!(events = events.len(), "parsed calendar feed");

    Ok(Calendar::from_events(events))
}

/// Look up a date-time property on a VEVENT and resolve it onto the
/// anchor timeline. A VEVENT without a usable DTSTART/DTEND makes the
/// whole feed invalid.
fn prop_to_instant(
    vevent: &icalendar::parser::Component,
    name: &str,
    anchor: FixedOffset,
) -> CalendarResult<DateTime<FixedOffset>> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| CalendarError::Parse(format!("VEVENT is missing {}", name)))?;

    let dpt = DatePerhapsTime::try_from(prop)
        .ok()
        .ok_or_else(|| CalendarError::Parse(format!("Unreadable {} value", name)))?;

    resolve(dpt, anchor).ok_or_else(|| CalendarError::Parse(format!("Unmappable {} value", name)))
}

/// Resolve the parser's date-or-datetime to an instant in the anchor
/// time zone.
fn resolve(dpt: DatePerhapsTime, anchor: FixedOffset) -> Option<DateTime<FixedOffset>> {
    match dpt {
        // Date-only entries start at midnight, anchor time
        DatePerhapsTime::Date(d) => in_anchor(d.and_hms_opt(0, 0, 0)?, anchor),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => Some(dt.with_timezone(&anchor)),
            CalendarDateTime::Floating(naive) => in_anchor(naive, anchor),
            CalendarDateTime::WithTimezone { date_time, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => date_time
                    .and_local_timezone(tz)
                    .earliest()
                    .map(|dt| dt.with_timezone(&anchor)),
                // Unknown TZID: fall back to the anchor offset
                Err(_) => in_anchor(date_time, anchor),
            },
        },
    }
}

fn in_anchor(naive: NaiveDateTime, anchor: FixedOffset) -> Option<DateTime<FixedOffset>> {
    naive.and_local_timezone(anchor).single()
}
