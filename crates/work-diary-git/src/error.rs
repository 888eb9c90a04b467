// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for work-diary-git

use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while querying and parsing the git history
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Repository has no working tree to write the diary into
    #[error("Repository has no working directory: {path}")]
    BareRepository {
        /// Path of the bare repository
        path: String,
    },

    /// No author was supplied and none is configured
    #[error("No author given and git user.name is not configured")]
    MissingAuthor,

    /// Start of the window lies after its end
    #[error("Invalid date window: {since} is after {until}")]
    InvalidWindow {
        /// Requested start date
        since: String,
        /// Requested end date
        until: String,
    },

    /// The git process could not be started
    #[error("Failed to run `{query}`: {source}")]
    Spawn {
        /// The query as a shell command line
        query: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The git process exited unsuccessfully
    #[error("`{query}` failed ({status}): {stderr}")]
    CommandFailed {
        /// The query as a shell command line
        query: String,
        /// Exit status of the process
        status: ExitStatus,
        /// Captured standard error
        stderr: String,
    },

    /// The git process did not finish in time
    #[error("`{query}` timed out after {seconds}s")]
    Timeout {
        /// The query as a shell command line
        query: String,
        /// The timeout that expired
        seconds: u64,
    },

    /// A wrapped record did not match the field layout
    #[error("Malformed log record: {record}")]
    MalformedRecord {
        /// The offending record text
        record: String,
    },
}

impl GitError {
    /// Whether this error came from executing the query process
    #[must_use]
    pub fn is_process_failure(&self) -> bool {
        matches!(
            self,
            Self::Spawn { .. } | Self::CommandFailed { .. } | Self::Timeout { .. }
        )
    }

    /// The query text attached to a process failure, if any
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Spawn { query, .. }
            | Self::CommandFailed { query, .. }
            | Self::Timeout { query, .. } => Some(query),
            _ => None,
        }
    }
}
