//! Live availability classification.
//!
//! A pure ordered decision list over `(now, incognito, calendar)`.
//! First match wins; there are no transitions, no retained state.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::breaks::break_candidates;
use crate::event::Calendar;
use crate::interval::Spanning;
use crate::window::{day_window, filter_into};

/// The fixed set of availability states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Unknown,
    Unavailable,
    Finished,
    Starting,
    Busy,
    Free,
}

/// A state paired with its human-readable explanation. The caller
/// attaches the user's display identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityStatus {
    #[serde(rename = "status")]
    pub kind: StatusKind,
    #[serde(rename = "statusInfo")]
    pub info: String,
}

impl AvailabilityStatus {
    fn new(kind: StatusKind, info: impl Into<String>) -> Self {
        AvailabilityStatus {
            kind,
            info: info.into(),
        }
    }
}

/// Classify a user's availability at `now`.
///
/// `calendar` is `None` when no feed data exists for the user at all,
/// which is a distinct state from "calendar with nothing on today".
/// This function is total: every input maps to exactly one state.
pub fn classify(
    now: DateTime<FixedOffset>,
    incognito: bool,
    calendar: Option<&Calendar>,
) -> AvailabilityStatus {
    // Case 1: no feed associated with the user
    let Some(calendar) = calendar else {
        return AvailabilityStatus::new(StatusKind::Unknown, "User has no calendar");
    };

    let todays = filter_into(&day_window(now), calendar.events());

    // Case 2: nothing scheduled today, or the user is hiding
    if todays.is_empty() || incognito {
        return AvailabilityStatus::new(StatusKind::Unavailable, "No uni today");
    }

    // Case 3: everything today has already ended
    if todays.iter().all(|e| e.end() < now) {
        // Unwrap safe: todays is non-empty
        let finished = todays.iter().map(|e| e.end()).max().unwrap();
        return AvailabilityStatus::new(
            StatusKind::Finished,
            format!("Finished uni at {}", finished.format("%H:%M")),
        );
    }

    // Case 4: nothing today has started yet
    if todays.iter().all(|e| now < e.start()) {
        let first = todays.iter().map(|e| e.start()).min().unwrap();
        return AvailabilityStatus::new(
            StatusKind::Starting,
            format!("Uni starts at {}", first.format("%H:%M")),
        );
    }

    let current_event = calendar.events().iter().find(|e| e.interval.contains(now));
    // Candidates, not derived breaks: a short gap has to stay visible
    // here so it can re-attribute to "busy until the next class"
    let current_break = break_candidates(calendar.events())
        .into_iter()
        .find(|b| b.interval.contains(now));

    // Case 5: on a usable break
    if let Some(brk) = &current_break {
        if !brk.is_short() && !brk.is_overnight() {
            return AvailabilityStatus::new(
                StatusKind::Free,
                format!("until {}", brk.end().format("%H:%M")),
            );
        }
    }

    // Case 6: a short gap does not count as free time; the user is
    // occupied until the next event ends
    let mut free_at = current_event.map(|e| e.end());
    if free_at.is_none() && current_break.as_ref().is_some_and(|b| b.is_short()) {
        free_at = todays
            .iter()
            .filter(|e| now < e.start())
            .min_by_key(|e| e.start())
            .map(|e| e.end());
    }

    // Case 7: mid-event (or bridging a short gap into one)
    if let Some(end) = free_at {
        return AvailabilityStatus::new(StatusKind::Busy, format!("Free at {}", end.format("%H:%M")));
    }

    // Case 8: unreachable over a populated, time-bounded agenda; a
    // classifier defect, not a user-facing failure
    tracing::warn!(
        ?now,
        todays_events = todays.len(),
        "availability classifier fell through every case"
    );
    AvailabilityStatus::new(StatusKind::Unknown, "???")
}
