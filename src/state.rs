//! The read model the UI renders from.

use crate::api::{AnalyzedTweet, StatsSnapshot};
use crate::draft::Draft;

/// Everything the presentation layer needs, mutated only by the
/// [`SyncController`](crate::controller::SyncController).
///
/// `tweets` keeps the order the list service returned (most recent first on
/// the reference backend); the client never re-sorts. `stats` stays `None`
/// until the first successful stats fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub draft: Draft,
    pub tweets: Vec<AnalyzedTweet>,
    pub stats: Option<StatsSnapshot>,
    /// True while an analyze call is in flight. Doubles as the submit
    /// re-entrancy guard.
    pub loading: bool,
    /// The single user-visible error slot. A new error overwrites the
    /// previous one; errors are never queued.
    pub error: Option<String>,
    /// Informational line (startup health probe result and the like).
    pub status: Option<String>,
}
