// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The work-diary command
//!
//! [`run`] executes the whole pipeline once: locate the project, resolve the
//! author, query git, normalize and render the entries, and write the
//! document. Every failure is returned as a [`DiaryError`]; an empty history
//! is not a failure but [`Outcome::NoCommits`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};
use work_diary_git::{
    GitError, IdentityProvider, LogQuery, fetch_commits, project_root, resolve_author,
};

use crate::entry::{EntryError, Locale, normalize_all};
use crate::render::{Header, OutputFormat, file_name, render_json, render_markdown, sort_entries};

/// Everything one run of the command needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryRequest {
    /// Author given by the caller; `None` falls back to the configured identity
    pub author: Option<String>,
    /// First day of the window
    pub since: NaiveDate,
    /// Last day of the window
    pub until: NaiveDate,
    /// Directory inside the project
    pub workspace: PathBuf,
    /// Where to write the document; defaults to the project root
    pub output_dir: Option<PathBuf>,
    /// Locale of labels and file name
    pub locale: Locale,
    /// Document format
    pub format: OutputFormat,
    /// git executable
    pub git_binary: PathBuf,
    /// Time limit for the git process
    pub timeout: Duration,
    /// Time zone for the window and printed times; `None` uses the local zone
    pub time_zone: Option<String>,
    /// Write a header-only document when nothing matches
    pub write_empty: bool,
    /// Return the document instead of writing it
    pub to_stdout: bool,
}

impl DiaryRequest {
    /// A request with default settings for the given window
    #[must_use]
    pub fn new(workspace: impl Into<PathBuf>, since: NaiveDate, until: NaiveDate) -> Self {
        Self {
            author: None,
            since,
            until,
            workspace: workspace.into(),
            output_dir: None,
            locale: Locale::default(),
            format: OutputFormat::default(),
            git_binary: PathBuf::from("git"),
            timeout: work_diary_git::query::DEFAULT_TIMEOUT,
            time_zone: None,
            write_empty: false,
            to_stdout: false,
        }
    }

    /// Set the explicit author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    fn explicit_author(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The document was written to `path`
    Written {
        /// Path of the document
        path: PathBuf,
        /// Number of entries in it
        entries: usize,
    },
    /// The document was rendered for standard output
    Printed {
        /// Rendered document
        document: String,
        /// Number of entries in it
        entries: usize,
    },
    /// No commits matched; nothing was written
    NoCommits {
        /// Author that was queried
        author: String,
        /// First day of the window
        since: NaiveDate,
        /// Last day of the window
        until: NaiveDate,
    },
}

/// Failures of the work-diary command
#[derive(Debug, Error)]
pub enum DiaryError {
    /// No project directory or no resolvable author
    #[error("Environment error: {0}")]
    Environment(#[source] GitError),

    /// The request itself is unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] GitError),

    /// The git query could not be executed
    #[error("Git command failed: {0}")]
    Process(#[source] GitError),

    /// git output did not follow the record layout
    #[error("Unexpected git log output: {0}")]
    Record(#[source] GitError),

    /// A record broke the timestamp contract
    #[error("Unexpected timestamp in git log output: {0}")]
    Entry(#[from] EntryError),

    /// Entries could not be serialized
    #[error("Failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The document could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DiaryError {
    /// Whether the error means git output and the parser disagree
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Entry(_))
    }
}

fn query_error(err: GitError) -> DiaryError {
    if err.is_process_failure() {
        DiaryError::Process(err)
    } else {
        DiaryError::Record(err)
    }
}

/// Run the command once
///
/// # Errors
///
/// Returns `DiaryError` for environment, process, contract and I/O failures.
/// No file is written when an error is returned.
pub async fn run(
    request: &DiaryRequest,
    identity: &dyn IdentityProvider,
) -> Result<Outcome, DiaryError> {
    let root = project_root(&request.workspace).map_err(DiaryError::Environment)?;
    let author =
        resolve_author(request.explicit_author(), identity).map_err(DiaryError::Environment)?;

    let mut query = LogQuery::new(&author, request.since, request.until)
        .map_err(DiaryError::InvalidRequest)?
        .in_dir(&root)
        .with_git_binary(&request.git_binary)
        .with_timeout(request.timeout);
    if let Some(ref zone) = request.time_zone {
        query = query.with_time_zone(zone.as_str());
    }

    info!(
        author = %author,
        since = %request.since,
        until = %request.until,
        "Collecting commits"
    );
    let raws = fetch_commits(&query).await.map_err(query_error)?;

    if raws.is_empty() && !request.write_empty {
        info!(author = %author, "No commits found in the window");
        return Ok(Outcome::NoCommits {
            author,
            since: request.since,
            until: request.until,
        });
    }

    let mut entries = normalize_all(raws, request.locale)?;
    sort_entries(&mut entries);
    debug!(count = entries.len(), "Normalized entries");

    let header = (request.explicit_author().is_some() || entries.is_empty()).then(|| Header {
        author: author.clone(),
        since: request.since,
        until: request.until,
    });

    let document = match request.format {
        OutputFormat::Markdown => render_markdown(&entries, header.as_ref(), request.locale),
        OutputFormat::Json => render_json(&entries)?,
    };

    if request.to_stdout {
        return Ok(Outcome::Printed {
            document,
            entries: entries.len(),
        });
    }

    let dir = request.output_dir.as_deref().unwrap_or(&root);
    let path = write_document(
        dir,
        &file_name(request.locale, request.format, request.since, request.until),
        &document,
    )?;
    info!(path = %path.display(), entries = entries.len(), "Wrote work diary");

    Ok(Outcome::Written {
        path,
        entries: entries.len(),
    })
}

/// Write the whole document in one call, replacing any existing file
fn write_document(dir: &Path, name: &str, document: &str) -> Result<PathBuf, DiaryError> {
    let path = dir.join(name);
    std::fs::write(&path, document).map_err(|source| DiaryError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
