//! Shared free time across a group of users.
//!
//! Merging everyone's events into one timeline and running the break
//! sweep over it finds exactly the mutual gaps: a gap only exists in
//! the merged timeline where no participant has an event.

use chrono::{DateTime, FixedOffset};

use crate::breaks::{Break, derive_breaks};
use crate::constants::MAX_SHARED_BREAKS;
use crate::event::{Calendar, Event};
use crate::interval::Spanning;
use crate::window::{filter_into, week_window};

/// One participant in a group availability query. Not persisted by the
/// engine; the caller assembles these from whatever store it has.
#[derive(Debug, Clone)]
pub struct GroupMember {
    pub name: String,
    pub calendar: Option<Calendar>,
    pub incognito: bool,
}

impl GroupMember {
    pub fn new(name: impl Into<String>, calendar: Option<Calendar>, incognito: bool) -> Self {
        GroupMember {
            name: name.into(),
            calendar,
            incognito,
        }
    }

    pub fn has_calendar(&self) -> bool {
        self.calendar.is_some()
    }
}

/// Upcoming breaks common to every member, soonest first, capped to
/// bound response size. Members without calendar data contribute no
/// events and so never constrain the result.
pub fn shared_breaks(members: &[GroupMember], now: DateTime<FixedOffset>) -> Vec<Break> {
    let merged: Vec<Event> = members
        .iter()
        .filter_map(|m| m.calendar.as_ref())
        .flat_map(|c| c.events().iter().cloned())
        .collect();

    let mut shared: Vec<Break> = derive_breaks(&merged)
        .into_iter()
        .filter(|b| now < b.end())
        .collect();
    shared.sort_by_key(|b| b.start());
    shared.truncate(MAX_SHARED_BREAKS);
    shared
}

/// This week's remaining shared breaks: the shared set windowed into
/// the current Sunday-to-Sunday week.
pub fn remaining_shared_breaks_this_week(
    members: &[GroupMember],
    now: DateTime<FixedOffset>,
) -> Vec<Break> {
    filter_into(&week_window(now), &shared_breaks(members, now))
}

/// Two-party availability reuses the group path with a participant set
/// of exactly {user, friend}. If either party has no calendar data
/// there is no mutual timeline to speak of, so the result is empty.
pub fn pair_breaks(
    user: &GroupMember,
    friend: &GroupMember,
    now: DateTime<FixedOffset>,
) -> Vec<Break> {
    if !user.has_calendar() || !friend.has_calendar() {
        return Vec::new();
    }
    shared_breaks(&[user.clone(), friend.clone()], now)
}
