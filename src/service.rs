//! Response assembly for the availability surface.
//!
//! Couples the engine's pure results with user display identities into
//! the JSON shapes the response layer serves. Nothing here fetches or
//! persists anything.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use unibreak_core::{
    AvailabilityStatus, BreakSlot, Calendar, GroupMember, WeekAgenda, classify, filter_into,
    pair_breaks, to_weekly_agenda, week_window,
};

/// A user's availability with their display identity attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStatus {
    pub name: String,
    #[serde(flatten)]
    pub status: AvailabilityStatus,
}

/// Two-party availability: the user's own status plus the breaks they
/// share with the friend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendAvailability {
    pub name: String,
    #[serde(flatten)]
    pub status: AvailabilityStatus,
    pub breaks: Vec<BreakSlot>,
}

/// This week's events grouped into the Monday..Sunday agenda shape.
pub fn weekly_agenda(calendar: &Calendar, now: DateTime<FixedOffset>) -> WeekAgenda {
    let this_week = filter_into(&week_window(now), calendar.events());
    to_weekly_agenda(&this_week)
}

/// Classify one member's live availability.
pub fn member_status(member: &GroupMember, now: DateTime<FixedOffset>) -> MemberStatus {
    MemberStatus {
        name: member.name.clone(),
        status: classify(now, member.incognito, member.calendar.as_ref()),
    }
}

/// The user's status plus their shared breaks with a friend, ready for
/// serialization.
pub fn friend_availability(
    user: &GroupMember,
    friend: &GroupMember,
    now: DateTime<FixedOffset>,
) -> FriendAvailability {
    let breaks = pair_breaks(user, friend, now)
        .iter()
        .map(|b| b.to_slot())
        .collect();

    FriendAvailability {
        name: user.name.clone(),
        status: classify(now, user.incognito, user.calendar.as_ref()),
        breaks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use unibreak_core::constants::default_anchor;
    use unibreak_core::{Event, StatusKind};

    fn at(h: u32, min: u32) -> DateTime<FixedOffset> {
        default_anchor().with_ymd_and_hms(2017, 3, 27, h, min, 0).unwrap()
    }

    fn lecture(start: (u32, u32), end: (u32, u32)) -> Event {
        Event::new("CSSE3002", "50-T203", at(start.0, start.1), at(end.0, end.1))
    }

    #[test]
    fn test_weekly_agenda_only_includes_this_week() {
        let tz = default_anchor();
        let calendar = Calendar::from_events(vec![
            lecture((9, 0), (10, 0)),
            Event::new(
                "SEMESTER TWO",
                "",
                tz.with_ymd_and_hms(2017, 8, 1, 9, 0, 0).unwrap(),
                tz.with_ymd_and_hms(2017, 8, 1, 10, 0, 0).unwrap(),
            ),
        ]);

        let agenda = weekly_agenda(&calendar, at(12, 0));

        assert_eq!(agenda.monday.len(), 1);
        assert!(agenda.tuesday.is_empty());
    }

    #[test]
    fn test_member_status_attaches_the_display_name() {
        let member = GroupMember::new("alice", None, false);

        let status = member_status(&member, at(12, 0));

        assert_eq!(status.name, "alice");
        assert_eq!(status.status.kind, StatusKind::Unknown);
    }

    #[test]
    fn test_friend_availability_shape() {
        let events = vec![lecture((9, 0), (10, 0)), lecture((11, 0), (12, 0))];
        let alice = GroupMember::new("alice", Some(Calendar::from_events(events.clone())), false);
        let bob = GroupMember::new("bob", Some(Calendar::from_events(events)), false);

        let availability = friend_availability(&alice, &bob, at(9, 30));
        let json = serde_json::to_value(&availability).unwrap();

        assert_eq!(json["name"], "alice");
        assert_eq!(json["status"], "Busy");
        assert_eq!(json["statusInfo"], "Free at 10:00");
        assert_eq!(json["breaks"][0]["start"], "10:00");
        assert_eq!(json["breaks"][0]["end"], "11:00");
        assert_eq!(json["breaks"][0]["day"], "Monday");
    }

    #[test]
    fn test_friend_without_calendar_yields_no_breaks() {
        let alice = GroupMember::new(
            "alice",
            Some(Calendar::from_events(vec![lecture((9, 0), (10, 0))])),
            false,
        );
        let newbie = GroupMember::new("newbie", None, false);

        let availability = friend_availability(&alice, &newbie, at(9, 30));

        assert!(availability.breaks.is_empty());
    }
}
