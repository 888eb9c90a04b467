// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log query construction
//!
//! A [`LogQuery`] describes one `git log` invocation: the commits of a single
//! author inside an inclusive date window, merge commits excluded, each commit
//! wrapped in explicit open/close markers so that the record extractor can
//! recover it regardless of what the message contains.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::GitError;

/// Marker opening every emitted record
pub const RECORD_OPEN: &str = "<git-commit>";

/// Marker closing every emitted record
pub const RECORD_CLOSE: &str = "</git-commit>";

/// `--date=format-local:` layout; the extractor relies on it exactly
///
/// Times are printed in the local time zone of the git process, the same
/// zone git uses to read `--since` and `--until`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %A";

/// Default time limit for the git process
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A validated `git log` query for one author and date window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    author: String,
    since: NaiveDate,
    until: NaiveDate,
    workdir: PathBuf,
    git_binary: PathBuf,
    timeout: Duration,
    time_zone: Option<String>,
}

impl LogQuery {
    /// Create a query for `author` between `since` and `until` (both inclusive)
    ///
    /// # Errors
    ///
    /// Returns `GitError::MissingAuthor` if the author is blank, and
    /// `GitError::InvalidWindow` if `since` is after `until`.
    pub fn new(author: &str, since: NaiveDate, until: NaiveDate) -> Result<Self, GitError> {
        let author = author.trim();
        if author.is_empty() {
            return Err(GitError::MissingAuthor);
        }
        if since > until {
            return Err(GitError::InvalidWindow {
                since: since.to_string(),
                until: until.to_string(),
            });
        }

        Ok(Self {
            author: author.to_string(),
            since,
            until,
            workdir: PathBuf::from("."),
            git_binary: PathBuf::from("git"),
            timeout: DEFAULT_TIMEOUT,
            time_zone: None,
        })
    }

    /// Run the query inside the given directory
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = dir.into();
        self
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_git_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.git_binary = binary.into();
        self
    }

    /// Limit how long the git process may run
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run git with `TZ` set to `zone` instead of the inherited one
    ///
    /// The zone drives both the window bounds and the printed times.
    #[must_use]
    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    /// The author filter
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// First day of the window
    #[must_use]
    pub fn since(&self) -> NaiveDate {
        self.since
    }

    /// Last day of the window
    #[must_use]
    pub fn until(&self) -> NaiveDate {
        self.until
    }

    /// Working directory of the query
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The git executable
    #[must_use]
    pub fn git_binary(&self) -> &Path {
        &self.git_binary
    }

    /// The process time limit
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `TZ` override for the git process, if any
    #[must_use]
    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }

    /// The pretty-format template wrapping each commit
    ///
    /// Field order is part of the parser contract: author and date come first
    /// with restricted contents, the free-text message comes last.
    #[must_use]
    pub fn pretty_format() -> String {
        format!("format:{RECORD_OPEN}author->%an|date->%ad|message->%B{RECORD_CLOSE}")
    }

    /// The argument vector passed to git
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        vec![
            "log".to_string(),
            "--no-merges".to_string(),
            "--fixed-strings".to_string(),
            format!("--author={}", self.author),
            format!("--since={} 00:00:00", self.since.format("%Y-%m-%d")),
            format!("--until={} 23:59:59", self.until.format("%Y-%m-%d")),
            "-z".to_string(),
            format!("--date=format-local:{DATE_FORMAT}"),
            format!("--pretty={}", Self::pretty_format()),
        ]
    }
}

impl fmt::Display for LogQuery {
    /// Renders the query as a shell command line for diagnostics
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref zone) = self.time_zone {
            write!(f, "TZ={} ", shell_quote(zone))?;
        }
        write!(f, "{}", shell_quote(&self.git_binary.to_string_lossy()))?;
        for arg in self.args() {
            write!(f, " {}", shell_quote(&arg))?;
        }
        Ok(())
    }
}

/// Quote a word for a POSIX shell, leaving plain words untouched
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@%+".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
