//! Break derivation: the gaps between scheduled events.
//!
//! The sweep walks a work queue of events ordered by start. An event
//! only gets to open a gap if its end is "exposed", i.e. not swallowed
//! by some later-starting event that is still in the queue. Without
//! that check, nested events would generate gaps that do not exist.

use std::collections::VecDeque;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constants::SHORT_BREAK_MINUTES;
use crate::event::Event;
use crate::interval::{Interval, Spanning};

/// A derived gap between two events. Never parsed from a feed; only the
/// sweep in this module constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Break {
    pub interval: Interval,
}

impl Break {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Break {
            interval: Interval::new(start, end),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.interval.duration().num_minutes()
    }

    /// Under 15 minutes is not practically usable free time. Degenerate
    /// negative-duration candidates (one event fully covering the next)
    /// count as short too, which is what removes them.
    pub fn is_short(&self) -> bool {
        self.duration_minutes() < SHORT_BREAK_MINUTES
    }

    /// A gap crossing a calendar-day boundary is not a same-day
    /// free-time signal.
    pub fn is_overnight(&self) -> bool {
        self.interval.start.date_naive() != self.interval.end.date_naive()
    }

    /// The wire shape for a break: clock times plus the day name.
    pub fn to_slot(&self) -> BreakSlot {
        BreakSlot {
            start: self.interval.start.format("%H:%M").to_string(),
            end: self.interval.end.format("%H:%M").to_string(),
            day: self.interval.start.format("%A").to_string(),
        }
    }
}

impl Spanning for Break {
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

/// JSON shape for one break in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakSlot {
    pub start: String,
    pub end: String,
    pub day: String,
}

/// Raw sweep output: every candidate gap, including short and overnight
/// ones. The status classifier needs the short candidates to tell "on a
/// short break before the next class" apart from "free".
pub fn break_candidates(events: &[Event]) -> Vec<Break> {
    let mut by_start: VecDeque<Event> = {
        let mut sorted = events.to_vec();
        sorted.sort_by_key(|e| e.interval.start);
        sorted.into()
    };

    let mut candidates = Vec::new();

    // Once fewer than two events remain there is no gap left to find
    while by_start.len() >= 2 {
        let Some(subject) = by_start.pop_front() else {
            break;
        };

        // Only subjects with exposed outer-ends get to open a gap to
        // the next event
        if by_start
            .iter()
            .any(|queued| queued.interval.contains(subject.interval.end))
        {
            continue;
        }

        if let Some(next) = by_start.front() {
            candidates.push(Break::new(subject.interval.end, next.interval.start));
        }
    }

    candidates
}

/// The usable gaps between events: candidates minus the short and the
/// overnight ones.
pub fn derive_breaks(events: &[Event]) -> Vec<Break> {
    break_candidates(events)
        .into_iter()
        .filter(|b| !b.is_short() && !b.is_overnight())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::default_anchor;
    use chrono::{FixedOffset, TimeZone};

    fn event(day: u32, start: (u32, u32), end_day: u32, end: (u32, u32)) -> Event {
        let tz = default_anchor();
        Event::new(
            "TEST1000",
            "12-345",
            tz.with_ymd_and_hms(2017, 3, day, start.0, start.1, 0).unwrap(),
            tz.with_ymd_and_hms(2017, 3, end_day, end.0, end.1, 0).unwrap(),
        )
    }

    fn same_day_event(start: (u32, u32), end: (u32, u32)) -> Event {
        event(27, start, 27, end)
    }

    fn hm(brk: &Break) -> (String, String) {
        (
            brk.interval.start.format("%H:%M").to_string(),
            brk.interval.end.format("%H:%M").to_string(),
        )
    }

    #[test]
    fn test_gap_between_two_events_becomes_a_break() {
        let events = vec![same_day_event((9, 0), (10, 0)), same_day_event((11, 0), (12, 0))];

        let breaks = derive_breaks(&events);

        assert_eq!(breaks.len(), 1);
        assert_eq!(hm(&breaks[0]), ("10:00".to_string(), "11:00".to_string()));
        assert_eq!(breaks[0].duration_minutes(), 60);
    }

    #[test]
    fn test_gap_under_fifteen_minutes_is_dropped() {
        let events = vec![same_day_event((9, 0), (10, 0)), same_day_event((10, 5), (11, 0))];

        assert!(derive_breaks(&events).is_empty());

        // The candidate is still visible to the classifier path
        let candidates = break_candidates(&events);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].duration_minutes(), 5);
        assert!(candidates[0].is_short());
    }

    #[test]
    fn test_gap_of_exactly_fifteen_minutes_is_kept() {
        let events = vec![same_day_event((9, 0), (10, 0)), same_day_event((10, 15), (11, 0))];

        let breaks = derive_breaks(&events);

        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].duration_minutes(), 15);
    }

    #[test]
    fn test_overnight_gap_is_dropped() {
        let events = vec![event(27, (22, 0), 27, (23, 0)), event(28, (9, 0), 28, (10, 0))];

        assert!(derive_breaks(&events).is_empty());
    }

    #[test]
    fn test_gap_after_an_overnight_event_is_kept_when_same_day() {
        // Event runs 22:00 into 01:00 the next day; the 01:00-03:00 gap
        // has both endpoints on day two, so it qualifies
        let events = vec![event(27, (22, 0), 28, (1, 0)), event(28, (3, 0), 28, (4, 0))];

        let breaks = derive_breaks(&events);

        assert_eq!(breaks.len(), 1);
        assert_eq!(hm(&breaks[0]), ("01:00".to_string(), "03:00".to_string()));
        assert_eq!(breaks[0].duration_minutes(), 120);
    }

    #[test]
    fn test_nested_event_does_not_create_a_spurious_gap() {
        // The 10:30 end is swallowed by the 10:00-12:00 event, so no
        // break opens at 10:30
        let events = vec![same_day_event((9, 0), (10, 30)), same_day_event((10, 0), (12, 0))];

        assert!(derive_breaks(&events).is_empty());
        assert!(break_candidates(&events).is_empty());
    }

    #[test]
    fn test_returned_breaks_are_well_formed_and_disjoint() {
        let events = vec![
            same_day_event((8, 0), (9, 0)),
            same_day_event((9, 30), (10, 30)),
            same_day_event((12, 0), (13, 0)),
            same_day_event((13, 5), (14, 0)),
            same_day_event((16, 0), (17, 0)),
        ];

        let breaks = derive_breaks(&events);

        for brk in &breaks {
            assert!(brk.interval.start < brk.interval.end);
            assert!(brk.duration_minutes() >= 15);
            assert_eq!(brk.interval.start.date_naive(), brk.interval.end.date_naive());
        }
        for pair in breaks.windows(2) {
            assert!(pair[0].interval.end <= pair[1].interval.start, "breaks overlap");
        }
    }

    #[test]
    fn test_deriving_twice_gives_identical_results() {
        let events = vec![
            same_day_event((9, 0), (10, 0)),
            same_day_event((11, 0), (12, 0)),
            same_day_event((14, 0), (15, 0)),
        ];

        assert_eq!(derive_breaks(&events), derive_breaks(&events));
    }

    #[test]
    fn test_unsorted_input_is_handled() {
        let events = vec![same_day_event((11, 0), (12, 0)), same_day_event((9, 0), (10, 0))];

        let breaks = derive_breaks(&events);

        assert_eq!(breaks.len(), 1);
        assert_eq!(hm(&breaks[0]), ("10:00".to_string(), "11:00".to_string()));
    }

    #[test]
    fn test_fewer_than_two_events_yields_no_breaks() {
        assert!(derive_breaks(&[]).is_empty());
        assert!(derive_breaks(&[same_day_event((9, 0), (10, 0))]).is_empty());
    }

    #[test]
    fn test_break_slot_carries_clock_times_and_day() {
        let tz: FixedOffset = default_anchor();
        let brk = Break::new(
            tz.with_ymd_and_hms(2017, 3, 27, 10, 0, 0).unwrap(),
            tz.with_ymd_and_hms(2017, 3, 27, 11, 0, 0).unwrap(),
        );

        let slot = brk.to_slot();
        assert_eq!(slot.start, "10:00");
        assert_eq!(slot.end, "11:00");
        assert_eq!(slot.day, "Monday");
    }
}
