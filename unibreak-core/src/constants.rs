//! Shared constants for the unibreak ecosystem.

use chrono::FixedOffset;

/// Gaps shorter than this many minutes are not usable free time.
/// A gap of exactly this length still counts as a break.
pub const SHORT_BREAK_MINUTES: i64 = 15;

/// Maximum number of shared breaks returned for a group, to bound
/// response size.
pub const MAX_SHARED_BREAKS: usize = 10;

/// Default anchor offset, in hours east of UTC (Brisbane, no DST).
pub const DEFAULT_ANCHOR_OFFSET_HOURS: i32 = 10;

/// The default anchor time zone for feeds that carry no offset.
pub fn default_anchor() -> FixedOffset {
    // Always valid: 10h is well inside FixedOffset's range
    FixedOffset::east_opt(DEFAULT_ANCHOR_OFFSET_HOURS * 3600).unwrap()
}
