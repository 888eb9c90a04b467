// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! work-diary-git: Git history querying for work-diary
//!
//! This library crate builds the `git log` query for one author and date
//! window, runs it, and extracts the wrapped commit records from its output.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use work_diary_git::{LogQuery, fetch_commits};
//!
//! # async fn demo() -> Result<(), work_diary_git::GitError> {
//! let since = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let until = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
//! let query = LogQuery::new("alice", since, until)?.in_dir(".");
//!
//! for c in fetch_commits(&query).await? {
//!     println!("{} - {}", c.date, c.subject());
//! }
//! # Ok(())
//! # }
//! ```

pub mod commit;
pub mod error;
pub mod identity;
pub mod parser;
pub mod query;
pub mod runner;

pub use commit::RawCommit;
pub use error::GitError;
pub use identity::{FixedIdentity, GitConfigIdentity, IdentityProvider, project_root, resolve_author};
pub use parser::parse_log_output;
pub use query::LogQuery;
pub use runner::{fetch_commits, run_log_query};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::RawCommit;
    pub use crate::error::GitError;
    pub use crate::identity::{IdentityProvider, resolve_author};
    pub use crate::query::LogQuery;
    pub use crate::runner::fetch_commits;
}
