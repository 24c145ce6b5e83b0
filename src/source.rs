//! Calendar source URL handling.
//!
//! Users paste share links in all sorts of shapes: missing scheme,
//! `webcal://`, no `.ics` suffix. Normalization fixes the common
//! mistakes; validation enforces the allow-list before any retrieval
//! is attempted.

use unibreak_core::{CalendarError, CalendarResult};

/// The only host calendar feeds may be retrieved from.
pub const ALLOWED_FEED_HOST: &str = "timetableplanner.app.uq.edu.au";

/// The path segment every share link carries.
const SHARE_SEGMENT: &str = "share";

/// Correct common user mistakes in a pasted feed URL.
pub fn normalize_feed_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    if !url.contains(".ics") {
        url.push_str(".ics");
    }

    if let Some(rest) = url.strip_prefix("webcal://") {
        // User copied the webcal:// link instead of https://
        url = format!("https://{}", rest);
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        // User didn't copy the scheme across at all
        url = format!("https://{}", url);
    }

    url
}

/// Check a normalized URL against the allow-list: the timetable-share
/// host, with a `share` path segment.
pub fn validate_feed_url(url: &str) -> CalendarResult<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| CalendarError::Retrieval(format!("Unsupported URL scheme: {}", url)))?;

    let (host, path) = rest
        .split_once('/')
        .ok_or_else(|| CalendarError::Retrieval(format!("URL has no path: {}", url)))?;

    if host != ALLOWED_FEED_HOST {
        return Err(CalendarError::Retrieval(format!(
            "Host '{}' is not an allowed calendar source",
            host
        )));
    }

    if !path.split('/').any(|segment| segment == SHARE_SEGMENT) {
        return Err(CalendarError::Retrieval(format!(
            "URL is not a share link: {}",
            url
        )));
    }

    Ok(())
}
