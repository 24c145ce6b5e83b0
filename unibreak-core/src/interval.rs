//! The foundational time span value type.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// A closed span of time. Every externally produced `Interval` satisfies
/// `start <= end`; the break sweep builds transient candidates that may
/// violate this, and the short-break filter removes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Interval {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Interval { start, end }
    }

    /// Whether the instant falls within the span, inclusive on both ends.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Signed duration of the span (negative for degenerate candidates).
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Anything that occupies an `Interval` on the timeline. Lets windowing
/// filter events and breaks with the same code.
pub trait Spanning {
    fn interval(&self) -> &Interval;

    fn start(&self) -> DateTime<FixedOffset> {
        self.interval().start
    }

    fn end(&self) -> DateTime<FixedOffset> {
        self.interval().end
    }
}
