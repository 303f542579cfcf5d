//! The compose draft and the validation that gates submission.

use thiserror::Error;

/// Twitter character limit, mirrored from the wire contract so an oversized
/// draft is rejected before any network call.
pub const MAX_TWEET_CHARS: usize = 280;

/// Why a draft may not be submitted. Messages match the ones the backend
/// would return for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Tweet text cannot be empty")]
    Empty,
    #[error("Tweet text too long (max 280 characters)")]
    TooLong,
}

/// Decide whether the given text may be submitted for analysis.
///
/// Pure function of the text: no side effects, no trimming of the input
/// itself. Counts characters, not bytes, so multibyte input does not trip
/// the limit early.
pub fn validate(text: &str) -> Result<(), DraftError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DraftError::Empty);
    }
    if trimmed.chars().count() > MAX_TWEET_CHARS {
        return Err(DraftError::TooLong);
    }
    Ok(())
}

/// The local-only compose buffer. Never persisted; edits never touch the
/// network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    text: String,
}

impl Draft {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append a character, enforcing the hard input cap.
    pub fn push_char(&mut self, c: char) {
        if self.char_count() < MAX_TWEET_CHARS {
            self.text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn remaining(&self) -> usize {
        MAX_TWEET_CHARS.saturating_sub(self.char_count())
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        validate(&self.text)
    }
}
