//! Orchestration of the remote calls: submit, refresh, delete.
//!
//! The controller owns the [`ViewState`] and is the only thing that mutates
//! it. Every mutation of server-side state is followed by a full refresh of
//! the list and the stats from the server; the client never patches its
//! local copy to match what it thinks happened.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::SentimentBackend;
use crate::state::ViewState;

const GENERIC_ANALYZE_ERROR: &str = "Failed to analyze tweet";

pub struct SyncController {
    backend: Arc<dyn SentimentBackend>,
    state: ViewState,
    history_limit: usize,
}

impl SyncController {
    pub fn new(backend: Arc<dyn SentimentBackend>, history_limit: usize) -> Self {
        Self {
            backend,
            state: ViewState::default(),
            history_limit,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Replace the whole draft. Local only; no network call. A stale error
    /// message is cleared lazily on the next submit attempt.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft.set(text);
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.state.draft.push_char(c);
    }

    pub fn pop_draft_char(&mut self) {
        self.state.draft.pop_char();
    }

    pub fn clear_draft(&mut self) {
        self.state.draft.clear();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.state.status = Some(status.into());
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    /// Re-fetch the tweet list and the stats snapshot from the server.
    ///
    /// The two reads are independent and issued concurrently; either may
    /// fail without rolling back the other. A failed read keeps the
    /// previous (stale) data and is logged only, since the next refresh
    /// will recover.
    pub async fn refresh_all(&mut self) {
        let (tweets, stats) = tokio::join!(
            self.backend.tweets(self.history_limit),
            self.backend.stats()
        );

        match tweets {
            Ok(tweets) => self.state.tweets = tweets,
            Err(e) => warn!("tweet list refresh failed: {e}"),
        }
        match stats {
            Ok(stats) => self.state.stats = Some(stats),
            Err(e) => warn!("stats refresh failed: {e}"),
        }
    }

    /// Validate the draft and, if it passes, send it for analysis.
    ///
    /// On success the draft is cleared and list + stats are re-fetched. On
    /// failure the draft is kept so the user can retry without retyping,
    /// and the server's error message (when it sent one) is surfaced.
    /// A failed analyze call touches no list/stats state.
    pub async fn submit(&mut self) {
        // Hard re-entrancy guard, not just a disabled button: a second
        // submit while one is in flight is a no-op.
        if self.state.loading {
            return;
        }

        if let Err(e) = self.state.draft.validate() {
            self.state.error = Some(e.to_string());
            return;
        }

        self.state.loading = true;
        self.state.error = None;

        let text = self.state.draft.text().to_string();
        match self.backend.analyze(&text).await {
            Ok(outcome) => {
                debug!(
                    "tweet {} analyzed as {} ({:.1}%)",
                    outcome.id, outcome.sentiment, outcome.confidence
                );
                self.state.draft.clear();
                self.refresh_all().await;
            }
            Err(e) => {
                warn!("analyze failed: {e}");
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| GENERIC_ANALYZE_ERROR.to_string());
                self.state.error = Some(message);
            }
        }

        self.state.loading = false;
    }

    /// Delete a tweet by id. Best-effort: a failed delete is logged and
    /// otherwise invisible; a successful one triggers the usual full
    /// refresh.
    pub async fn remove(&mut self, id: i64) {
        match self.backend.delete(id).await {
            Ok(()) => {
                debug!("tweet {id} deleted");
                self.refresh_all().await;
            }
            Err(e) => warn!("delete of tweet {id} failed: {e}"),
        }
    }
}
