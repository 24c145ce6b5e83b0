//! Feed retrieval around the pure engine.
//!
//! The engine only ever sees already-retrieved bytes; this module owns
//! the injected fetch capability, the per-fetch timeout, and the
//! bounded fan-out used to gather a whole group's calendars. There is
//! no retry anywhere: a fetch either yields bytes or fails, and a group
//! member whose fetch fails simply degrades to "no calendar".
//!
//! Cancellation is caller-side: dropping the returned future abandons
//! any in-flight fetches.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use unibreak_core::{Calendar, CalendarError, CalendarResult, GroupMember, parse_feed};

use crate::source::{normalize_feed_url, validate_feed_url};

/// How long a single feed fetch may take.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// How many feed fetches may be in flight at once during group fan-out.
pub const MAX_CONCURRENT_FETCHES: usize = 8;

/// The injected retrieval capability. Implementations decide transport;
/// the engine never performs network I/O itself.
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = CalendarResult<Vec<u8>>> + Send;
}

/// A successfully retrieved and parsed calendar. The raw bytes ride
/// along so the caller can persist the blob for later re-parsing.
#[derive(Debug, Clone)]
pub struct RetrievedCalendar {
    pub url: String,
    pub bytes: Vec<u8>,
    pub calendar: Calendar,
}

/// One member of a group as known to the surrounding system, before
/// any feed has been fetched.
#[derive(Debug, Clone)]
pub struct MemberSource {
    pub name: String,
    pub feed_url: Option<String>,
    pub incognito: bool,
}

impl MemberSource {
    pub fn new(name: impl Into<String>, feed_url: Option<String>, incognito: bool) -> Self {
        MemberSource {
            name: name.into(),
            feed_url,
            incognito,
        }
    }
}

/// The calendar-add flow: normalize the pasted URL, check it against
/// the allow-list, fetch with a timeout, then parse.
///
/// A malformed feed surfaces as `Parse`, an empty one as `Empty`, and a
/// network or allow-list failure as `Retrieval`; none are retried here.
pub async fn retrieve_calendar<F: FeedFetcher>(
    fetcher: &F,
    url: &str,
    anchor: FixedOffset,
) -> CalendarResult<RetrievedCalendar> {
    let url = normalize_feed_url(url);
    validate_feed_url(&url)?;

    let bytes = timeout(FETCH_TIMEOUT, fetcher.fetch(&url))
        .await
        .map_err(|_| CalendarError::FetchTimeout(FETCH_TIMEOUT.as_secs()))??;

    let calendar = parse_feed(&bytes, anchor)?;
    tracing::info!(%url, events = calendar.len(), "calendar retrieved");

    Ok(RetrievedCalendar {
        url,
        bytes,
        calendar,
    })
}

/// Fan out and fetch every member's feed with bounded concurrency,
/// gathering the results into engine-ready group members.
///
/// Failures degrade the member rather than the group: a missing URL, a
/// timed-out fetch or an unparseable feed all yield a member with no
/// calendar, and the aggregation step treats those as contributing no
/// events.
pub async fn gather_group<F: FeedFetcher>(
    fetcher: &F,
    sources: &[MemberSource],
    anchor: FixedOffset,
) -> Vec<GroupMember> {
    let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));

    let fetches = sources.iter().map(|source| {
        let permits = Arc::clone(&permits);
        async move {
            let Some(url) = &source.feed_url else {
                return GroupMember::new(source.name.clone(), None, source.incognito);
            };

            // Unwrap safe: the semaphore is never closed
            let _permit = permits.acquire().await.unwrap();

            let calendar = match timeout(FETCH_TIMEOUT, fetcher.fetch(url)).await {
                Ok(Ok(bytes)) => match parse_feed(&bytes, anchor) {
                    Ok(calendar) => Some(calendar),
                    Err(e) => {
                        tracing::warn!(member = %source.name, %url, error = %e, "unparseable feed");
                        None
                    }
                },
                Ok(Err(e)) => {
                    tracing::warn!(member = %source.name, %url, error = %e, "feed fetch failed");
                    None
                }
                Err(_) => {
                    tracing::warn!(member = %source.name, %url, "feed fetch timed out");
                    None
                }
            };

            GroupMember::new(source.name.clone(), calendar, source.incognito)
        }
    });

    join_all(fetches).await
}
