// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Execution of log queries
//!
//! The query runs as a child `git` process with an argument vector (no shell)
//! and is bounded by the query's timeout. Expiry kills the child and is
//! reported as [`GitError::Timeout`], never as an empty history.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::commit::RawCommit;
use crate::error::GitError;
use crate::parser::parse_log_output;
use crate::query::LogQuery;

/// Run a query and return git's raw standard output
///
/// # Errors
///
/// Returns `GitError::Spawn` if git cannot be started (missing binary, bad
/// working directory), `GitError::CommandFailed` if it exits unsuccessfully,
/// and `GitError::Timeout` if it does not finish within the query's timeout.
pub async fn run_log_query(query: &LogQuery) -> Result<String, GitError> {
    debug!(query = %query, dir = %query.workdir().display(), "Running git log");

    let mut cmd = Command::new(query.git_binary());
    cmd.args(query.args())
        .current_dir(query.workdir())
        .env("LC_ALL", "C")
        .env("GIT_PAGER", "cat")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(zone) = query.time_zone() {
        cmd.env("TZ", zone);
    }

    let output = match tokio::time::timeout(query.timeout(), cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(GitError::Spawn {
                query: query.to_string(),
                source,
            });
        }
        Err(_) => {
            return Err(GitError::Timeout {
                query: query.to_string(),
                seconds: query.timeout().as_secs(),
            });
        }
    };

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            query: query.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    debug!(bytes = output.stdout.len(), "git log finished");
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a query and extract its commit records
///
/// # Errors
///
/// Returns the errors of [`run_log_query`] and [`parse_log_output`].
pub async fn fetch_commits(query: &LogQuery) -> Result<Vec<RawCommit>, GitError> {
    let raw = run_log_query(query).await?;
    parse_log_output(&raw)
}
