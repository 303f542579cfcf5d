pub mod http;

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ApiResult;

/// Sentiment label assigned by the remote classifier. The classifier is
/// binary; an unknown label on the wire is a decode error, not a third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analyzed tweet as persisted by the store. Immutable on the client:
/// the local list is only ever replaced wholesale by a fresh server
/// snapshot, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedTweet {
    pub id: i64,
    pub text: String,
    pub sentiment: Sentiment,
    /// Classifier confidence as a percentage, 0-100.
    pub confidence: f64,
    /// Server-assigned, carried as the raw wire string. Formatting for
    /// display happens in the UI layer.
    pub timestamp: String,
}

/// What the analyze endpoint returns for a freshly classified tweet. The
/// persisted record (with its server timestamp) arrives via the next list
/// refresh, so this is informational only.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub id: i64,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

/// Per-label aggregate as computed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentBucket {
    pub count: u64,
    pub avg_confidence: f64,
}

/// Aggregate counts by sentiment. Always fetched fresh from the server after
/// a mutation; the client never derives these from its local list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsSnapshot {
    pub total_tweets: u64,
    pub positive: SentimentBucket,
    pub negative: SentimentBucket,
}

impl StatsSnapshot {
    pub fn bucket(&self, sentiment: Sentiment) -> &SentimentBucket {
        match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
        }
    }
}

/// Result of the service health probe.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub models_loaded: bool,
}

/// The remote sentiment service, as the client sees it: classify-and-store,
/// list, aggregate stats, delete-by-id, health probe.
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    async fn analyze(&self, text: &str) -> ApiResult<AnalysisOutcome>;

    async fn tweets(&self, limit: usize) -> ApiResult<Vec<AnalyzedTweet>>;

    async fn stats(&self) -> ApiResult<StatsSnapshot>;

    async fn delete(&self, id: i64) -> ApiResult<()>;

    async fn health(&self) -> ApiResult<HealthStatus>;
}
