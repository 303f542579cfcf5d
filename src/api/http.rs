use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    AnalysisOutcome, AnalyzedTweet, HealthStatus, Sentiment, SentimentBackend, SentimentBucket,
    StatsSnapshot,
};
use crate::error::{ApiError, ApiResult};

/// HTTP client for the sentiment analysis backend.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    id: i64,
    sentiment: Sentiment,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct TweetListResponse {
    tweets: Vec<ApiTweet>,
    #[serde(default)]
    count: usize,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: i64,
    text: String,
    sentiment: Sentiment,
    confidence: f64,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    total_tweets: u64,
    #[serde(default)]
    sentiment_distribution: Distribution,
}

// Labels with no tweets yet are simply absent from the distribution.
#[derive(Debug, Default, Deserialize)]
struct Distribution {
    positive: Option<ApiBucket>,
    negative: Option<ApiBucket>,
}

#[derive(Debug, Deserialize)]
struct ApiBucket {
    count: u64,
    #[serde(default)]
    avg_confidence: f64,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    models_loaded: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl From<ApiTweet> for AnalyzedTweet {
    fn from(t: ApiTweet) -> Self {
        AnalyzedTweet {
            id: t.id,
            text: t.text,
            sentiment: t.sentiment,
            confidence: t.confidence,
            timestamp: t.timestamp,
        }
    }
}

impl From<Option<ApiBucket>> for SentimentBucket {
    fn from(bucket: Option<ApiBucket>) -> Self {
        match bucket {
            Some(b) => SentimentBucket {
                count: b.count,
                avg_confidence: b.avg_confidence,
            },
            None => SentimentBucket::default(),
        }
    }
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sentui/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to an error, preferring the server's own
    /// `{"error": "..."}` message when the body carries one.
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(ApiError::Rejected {
                status: status.as_u16(),
                message: body.error,
            }),
            Err(_) => Err(ApiError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl SentimentBackend for HttpBackend {
    async fn analyze(&self, text: &str) -> ApiResult<AnalysisOutcome> {
        let response = self
            .client
            .post(self.url("/api/analyze"))
            .json(&AnalyzeRequest { text })
            .send()
            .await?;

        let body: AnalyzeResponse = Self::check(response).await?.json().await?;
        Ok(AnalysisOutcome {
            id: body.id,
            sentiment: body.sentiment,
            confidence: body.confidence,
        })
    }

    async fn tweets(&self, limit: usize) -> ApiResult<Vec<AnalyzedTweet>> {
        let response = self
            .client
            .get(self.url("/api/tweets"))
            .query(&[("limit", limit)])
            .send()
            .await?;

        let body: TweetListResponse = Self::check(response).await?.json().await?;
        tracing::debug!("fetched {} of {} tweets", body.tweets.len(), body.count);
        Ok(body.tweets.into_iter().map(AnalyzedTweet::from).collect())
    }

    async fn stats(&self) -> ApiResult<StatsSnapshot> {
        let response = self.client.get(self.url("/api/stats")).send().await?;

        let body: StatsResponse = Self::check(response).await?.json().await?;
        Ok(StatsSnapshot {
            total_tweets: body.total_tweets,
            positive: body.sentiment_distribution.positive.into(),
            negative: body.sentiment_distribution.negative.into(),
        })
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/delete/{}", id)))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        let response = self.client.get(self.url("/api/health")).send().await?;

        let body: HealthResponse = Self::check(response).await?.json().await?;
        Ok(HealthStatus {
            status: body.status,
            message: body.message,
            models_loaded: body.models_loaded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(5));
        assert_eq!(
            backend.url("/api/tweets"),
            "http://localhost:5000/api/tweets"
        );
    }

    #[test]
    fn test_url_joining_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(5));
        assert_eq!(backend.url("/api/stats"), "http://localhost:5000/api/stats");
    }

    #[test]
    fn test_parse_tweet_list() {
        let json = r#"{
            "tweets": [
                {
                    "id": 7,
                    "text": "Great day!",
                    "sentiment": "positive",
                    "confidence": 92.0,
                    "timestamp": "2024-03-01 09:30:00"
                },
                {
                    "id": 6,
                    "text": "Awful traffic.",
                    "sentiment": "negative",
                    "confidence": 81.5,
                    "timestamp": "2024-03-01 09:01:12"
                }
            ],
            "count": 2
        }"#;
        let body: TweetListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.count, 2);
        let tweets: Vec<AnalyzedTweet> =
            body.tweets.into_iter().map(AnalyzedTweet::from).collect();
        assert_eq!(tweets[0].id, 7);
        assert_eq!(tweets[0].sentiment, Sentiment::Positive);
        assert_eq!(tweets[0].confidence, 92.0);
        assert_eq!(tweets[1].text, "Awful traffic.");
    }

    #[test]
    fn test_parse_stats() {
        let json = r#"{
            "total_tweets": 10,
            "sentiment_distribution": {
                "positive": {"count": 6, "avg_confidence": 88.25},
                "negative": {"count": 4, "avg_confidence": 71.0}
            }
        }"#;
        let body: StatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.total_tweets, 10);
        assert_eq!(body.sentiment_distribution.positive.unwrap().count, 6);
    }

    #[test]
    fn test_parse_stats_missing_label_is_zero() {
        let json = r#"{
            "total_tweets": 2,
            "sentiment_distribution": {
                "positive": {"count": 2, "avg_confidence": 90.0}
            }
        }"#;
        let body: StatsResponse = serde_json::from_str(json).unwrap();
        let negative: SentimentBucket = body.sentiment_distribution.negative.into();
        assert_eq!(negative.count, 0);
        assert_eq!(negative.avg_confidence, 0.0);
    }

    #[test]
    fn test_parse_stats_empty_distribution() {
        let json = r#"{"total_tweets": 0, "sentiment_distribution": {}}"#;
        let body: StatsResponse = serde_json::from_str(json).unwrap();
        assert!(body.sentiment_distribution.positive.is_none());
        assert!(body.sentiment_distribution.negative.is_none());
    }

    #[test]
    fn test_parse_analyze_response() {
        let json = r#"{
            "id": 11,
            "text": "Great day!",
            "sentiment": "positive",
            "confidence": 92.0,
            "message": "Sentiment analyzed successfully"
        }"#;
        let body: AnalyzeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.id, 11);
        assert_eq!(body.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_parse_error_body() {
        let json = r#"{"error": "Tweet text too long (max 280 characters)"}"#;
        let body: ErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error, "Tweet text too long (max 280 characters)");
    }

    #[test]
    fn test_parse_health() {
        let json = r#"{
            "status": "healthy",
            "message": "Sentiment Analysis API is running",
            "models_loaded": true
        }"#;
        let body: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.status, "healthy");
        assert!(body.models_loaded);
    }

    #[test]
    fn test_unknown_sentiment_label_is_rejected() {
        let json = r#"{
            "tweets": [
                {
                    "id": 1,
                    "text": "meh",
                    "sentiment": "neutral",
                    "confidence": 50.0,
                    "timestamp": "2024-03-01 09:30:00"
                }
            ],
            "count": 1
        }"#;
        assert!(serde_json::from_str::<TweetListResponse>(json).is_err());
    }
}
