// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log output parsing
//!
//! This module turns the raw text produced by a [`LogQuery`](crate::LogQuery)
//! into [`RawCommit`] records.
//!
//! # Parser contract
//!
//! Extraction happens in two passes:
//!
//! 1. Records are cut out between `<git-commit>` and `</git-commit>`. A close
//!    marker only ends a record when it is followed by the NUL separator that
//!    `git log -z` places between commits (or by the end of the output), so a
//!    message quoting the marker text does not split its record.
//! 2. Each record is matched field by field. `author` and `date` use restricted
//!    character classes and come first; `message` is last and captures
//!    everything up to the close marker, newlines included. Reordering the
//!    fields breaks this guarantee.
//!
//! # Example
//!
//! ```
//! use work_diary_git::parser::parse_log_output;
//!
//! let raw = "<git-commit>author->alice|date->2024-03-04 09:15:00 Monday|message->1、fix bug</git-commit>";
//! let commits = parse_log_output(raw).unwrap();
//! assert_eq!(commits[0].author, "alice");
//! assert_eq!(commits[0].message, "1、fix bug");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::commit::RawCommit;
use crate::error::GitError;
use crate::query::{RECORD_CLOSE, RECORD_OPEN};

/// Regex cutting one wrapped record out of the output
///
/// Groups:
/// 1. record body between the markers
static RECORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?s){}(.*?){}\n?(?:\x00|\z)",
        regex::escape(RECORD_OPEN),
        regex::escape(RECORD_CLOSE)
    );
    Regex::new(&pattern).expect("Invalid record regex")
});

/// Regex splitting a record body into its fields
///
/// Format: `author-><name>|date-><YYYY-MM-DD HH:MM:SS Weekday>|message-><text>`
static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)\Aauthor->(?P<author>[^|\n]+)\|date->(?P<date>[0-9A-Za-z: -]+)\|message->(?P<message>.*)\z",
    )
    .expect("Invalid field regex")
});

/// Parse the complete output of a log query
///
/// Empty output, or output without any wrapped record, yields an empty list.
/// Records keep the order in which git emitted them.
///
/// # Errors
///
/// Returns `GitError::MalformedRecord` if a wrapped record does not match the
/// field layout.
pub fn parse_log_output(raw: &str) -> Result<Vec<RawCommit>, GitError> {
    if raw.trim().is_empty() {
        debug!("git log produced no output");
        return Ok(Vec::new());
    }

    let commits = RECORD_REGEX
        .captures_iter(raw)
        .map(|caps| parse_record(caps.get(1).map_or("", |m| m.as_str())))
        .collect::<Result<Vec<_>, _>>()?;

    if commits.is_empty() {
        warn!(
            bytes = raw.len(),
            "git log output contained no wrapped records"
        );
    } else {
        debug!(
            count = commits.len(),
            first = commits.first().map(RawCommit::subject).unwrap_or_default(),
            "Extracted commit records"
        );
    }

    Ok(commits)
}

/// Parse the body of a single wrapped record
///
/// # Errors
///
/// Returns `GitError::MalformedRecord` if the body does not match the field layout.
pub fn parse_record(body: &str) -> Result<RawCommit, GitError> {
    let caps = FIELD_REGEX
        .captures(body)
        .ok_or_else(|| GitError::MalformedRecord {
            record: body.to_string(),
        })?;

    let author = caps["author"].trim();
    let date = caps["date"].trim();
    if author.is_empty() || date.is_empty() {
        return Err(GitError::MalformedRecord {
            record: body.to_string(),
        });
    }

    Ok(RawCommit {
        author: author.to_string(),
        date: date.to_string(),
        message: caps["message"].trim_end().to_string(),
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for commit messages that never contain the NUL separator
    fn message_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("1、fix bug".to_string()),
            Just("line one\nline two\n\n- bullet".to_string()),
            Just(r#"{"json": true} | a->b"#.to_string()),
            r"[^\x00]{0,80}",
        ]
    }

    fn record_strategy() -> impl Strategy<Value = (String, String, String)> {
        (
            "[A-Za-z][A-Za-z0-9 ._-]{0,20}",
            prop_oneof![
                Just("2024-03-04 09:15:00 Monday".to_string()),
                Just("2025-12-31 23:59:59 Wednesday".to_string()),
            ],
            message_strategy(),
        )
    }

    proptest! {
        /// Property: N wrapped records yield exactly N commits
        #[test]
        fn prop_record_count_preserved(records in proptest::collection::vec(record_strategy(), 0..8)) {
            let raw = records
                .iter()
                .map(|(a, d, m)| format!("{RECORD_OPEN}author->{a}|date->{d}|message->{m}{RECORD_CLOSE}"))
                .collect::<Vec<_>>()
                .join("\0");

            let commits = parse_log_output(&raw).expect("parse");
            prop_assert_eq!(commits.len(), records.len());
            for (commit, (author, date, message)) in commits.iter().zip(&records) {
                prop_assert_eq!(&commit.author, author.trim());
                prop_assert_eq!(&commit.date, date);
                prop_assert_eq!(&commit.message, message.trim_end());
                prop_assert!(!commit.author.is_empty());
                prop_assert!(!commit.date.is_empty());
            }
        }

        /// Property: arbitrary input never panics the extractor
        #[test]
        fn prop_parse_never_panics(raw in ".{0,200}") {
            let _ = parse_log_output(&raw);
        }
    }
}
