//! Raw commit records extracted from `git log` output

use serde::{Deserialize, Serialize};

/// One commit record as emitted by the log query, before normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Author name
    pub author: String,
    /// Timestamp in the `YYYY-MM-DD HH:MM:SS Weekday` layout
    pub date: String,
    /// Full commit message, possibly spanning several lines
    pub message: String,
}

impl RawCommit {
    /// Create a record from its three fields
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        date: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            date: date.into(),
            message: message.into(),
        }
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
