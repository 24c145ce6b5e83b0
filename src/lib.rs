//! Availability service layer.
//!
//! Wraps the pure `unibreak-core` engine with the collaborating
//! concerns the engine deliberately excludes: calendar source URL
//! normalization and allow-listing, the injected feed-fetch capability
//! with timeouts and bounded group fan-out, and assembly of the JSON
//! response shapes.

pub mod fetch;
pub mod service;
pub mod source;

pub use fetch::{FeedFetcher, MemberSource, RetrievedCalendar, gather_group, retrieve_calendar};
pub use service::{FriendAvailability, MemberStatus, friend_availability, member_status, weekly_agenda};
pub use source::{normalize_feed_url, validate_feed_url};

// Re-export the engine so consumers need only one dependency
pub use unibreak_core as engine;
