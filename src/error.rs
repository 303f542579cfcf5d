//! Error types for the remote sentiment service.

use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures talking to the sentiment service.
///
/// Transport failures and non-2xx responses land in the same place for
/// callers: both are a failed call. They differ only in the message that can
/// be shown to the user, which `Rejected` carries verbatim from the server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a failure body (`{"error": "..."}`).
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Non-2xx response without a parseable error body.
    #[error("server returned HTTP {0}")]
    Status(u16),
}

impl ApiError {
    /// The error message the server provided, if it provided one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}
