//! Error types for the unibreak ecosystem.

use thiserror::Error;

/// Errors that can occur while handling calendar data.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// No feed data is associated with the user yet. This is a valid
    /// classifier input (it yields `Unknown`), not a malformed feed.
    #[error("No calendar data")]
    Empty,

    #[error("Calendar parse error: {0}")]
    Parse(String),

    #[error("Calendar retrieval error: {0}")]
    Retrieval(String),

    #[error("Calendar fetch timed out after {0}s")]
    FetchTimeout(u64),
}

/// Result type alias for unibreak operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
