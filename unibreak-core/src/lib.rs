//! Pure calendar availability engine.
//!
//! This crate turns a user's raw calendar-feed bytes into typed events,
//! derives the usable gaps ("breaks") between them, windows both into
//! day and week slices, classifies live availability into a fixed set
//! of states, and computes shared free time across a group of users.
//!
//! Everything here is a synchronous, side-effect-free function over
//! immutable inputs: the reference instant and anchor offset are passed
//! in explicitly, and no call retains state for the next one. Feed
//! retrieval lives in the `unibreak` service crate.

pub mod breaks;
pub mod constants;
pub mod error;
pub mod event;
pub mod feed;
pub mod group;
pub mod interval;
pub mod status;
pub mod window;

pub use breaks::{Break, BreakSlot, break_candidates, derive_breaks};
pub use error::{CalendarError, CalendarResult};
pub use event::{Calendar, Event};
pub use feed::parse_feed;
pub use group::{GroupMember, pair_breaks, remaining_shared_breaks_this_week, shared_breaks};
pub use interval::{Interval, Spanning};
pub use status::{AvailabilityStatus, StatusKind, classify};
pub use window::{WeekAgenda, day_window, filter_into, to_weekly_agenda, week_start, week_window};
