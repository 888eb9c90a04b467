//! Configuration for the work-diary command
//!
//! This module provides the command-line configuration, its validation, and
//! the conversion into a [`DiaryRequest`].

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use clap::Parser;

use crate::diary::DiaryRequest;
use crate::entry::Locale;
use crate::prompt::Answers;
use crate::render::OutputFormat;

/// Default length of the window, in days before today
pub const DEFAULT_WINDOW_DAYS: u64 = 7;

/// Default git process timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Work Diary - turn your git history into a day-by-day work log
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "work-diary")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Author to report on
    ///
    /// Matched literally against commit author names.
    /// Defaults to the configured git user.name.
    #[arg(short, long, env = "WORK_DIARY_AUTHOR")]
    pub author: Option<String>,

    /// First day of the window (YYYY-MM-DD)
    ///
    /// Defaults to 7 days before today.
    #[arg(short, long, env = "WORK_DIARY_SINCE", value_parser = parse_date)]
    pub since: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD), inclusive
    ///
    /// Defaults to today.
    #[arg(short, long, env = "WORK_DIARY_UNTIL", value_parser = parse_date)]
    pub until: Option<NaiveDate>,

    /// Directory inside the project to report on
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "WORK_DIARY_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Directory to write the document into
    ///
    /// Defaults to the project root.
    #[arg(short, long, env = "WORK_DIARY_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Language of weekday labels, title and file name
    #[arg(long, value_enum, default_value_t, env = "WORK_DIARY_LOCALE")]
    pub locale: Locale,

    /// Document format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Seconds to wait for git before giving up
    #[arg(long, env = "WORK_DIARY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Time zone for the window and the printed times (e.g. `UTC`)
    ///
    /// Defaults to the local time zone.
    #[arg(long, env = "WORK_DIARY_TZ")]
    pub time_zone: Option<String>,

    /// git executable to run
    #[arg(long, env = "WORK_DIARY_GIT")]
    pub git: Option<PathBuf>,

    /// Print the document instead of writing a file
    #[arg(long, default_value = "false")]
    pub stdout: bool,

    /// Write a header-only document when no commits match
    #[arg(long, default_value = "false")]
    pub write_empty: bool,

    /// Prompt for author, start date and end date
    #[arg(short, long, default_value = "false")]
    pub interactive: bool,

    /// Log at debug level (stderr)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Log warnings and errors only
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Parse a `YYYY-MM-DD` date argument
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected a date as YYYY-MM-DD: {e}"))
}

impl Config {
    /// The directory to start repository discovery from
    ///
    /// `None` when no workspace was given and the process has no readable
    /// current directory.
    #[must_use]
    pub fn workspace_path(&self) -> Option<PathBuf> {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
    }

    /// The start of the window, defaulting to a week before `today`
    #[must_use]
    pub fn since_or_default(&self, today: NaiveDate) -> NaiveDate {
        self.since.unwrap_or_else(|| {
            today
                .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS))
                .unwrap_or(today)
        })
    }

    /// The end of the window, defaulting to `today`
    #[must_use]
    pub fn until_or_default(&self, today: NaiveDate) -> NaiveDate {
        self.until.unwrap_or(today)
    }

    /// The git process timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// The git executable
    #[must_use]
    pub fn git_binary(&self) -> PathBuf {
        self.git.clone().unwrap_or_else(|| PathBuf::from("git"))
    }

    /// Take over the answers given at the interactive prompts
    pub fn apply_answers(&mut self, answers: Answers) {
        if answers.author.is_some() {
            self.author = answers.author;
        }
        if answers.since.is_some() {
            self.since = answers.since;
        }
        if answers.until.is_some() {
            self.until = answers.until;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The workspace or output path is specified but is not an existing directory
    /// - The window starts after it ends
    /// - The timeout is zero
    pub fn validate(&self, today: NaiveDate) -> Result<(), ConfigError> {
        if let Some(ref workspace) = self.workspace {
            if !workspace.exists() {
                return Err(ConfigError::WorkspaceNotFound(workspace.clone()));
            }
            if !workspace.is_dir() {
                return Err(ConfigError::WorkspaceNotDirectory(workspace.clone()));
            }
        }

        if let Some(ref output_dir) = self.output_dir {
            if !output_dir.is_dir() {
                return Err(ConfigError::OutputDirNotFound(output_dir.clone()));
            }
        }

        let since = self.since_or_default(today);
        let until = self.until_or_default(today);
        if since > until {
            return Err(ConfigError::InvalidWindow { since, until });
        }

        if self.timeout == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Build the request for one run
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoWorkingDirectory` if no workspace is given and
    /// the current directory cannot be determined.
    pub fn request(&self, today: NaiveDate) -> Result<DiaryRequest, ConfigError> {
        let workspace = self
            .workspace_path()
            .ok_or(ConfigError::NoWorkingDirectory)?;

        Ok(DiaryRequest {
            author: self.author.clone(),
            since: self.since_or_default(today),
            until: self.until_or_default(today),
            workspace,
            output_dir: self.output_dir.clone(),
            locale: self.locale,
            format: self.format,
            git_binary: self.git_binary(),
            timeout: self.timeout(),
            time_zone: self.time_zone.clone(),
            write_empty: self.write_empty,
            to_stdout: self.stdout,
        })
    }

    /// Log level selected by `-v` / `-q`; `-v` wins when both are given
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Problems found while validating a [`Config`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Workspace path not found
    #[error("Workspace path not found: {0}")]
    WorkspaceNotFound(PathBuf),

    /// Workspace path is not a directory
    #[error("Workspace path is not a directory: {0}")]
    WorkspaceNotDirectory(PathBuf),

    /// Output directory missing or not a directory
    #[error("Output directory not found: {0}")]
    OutputDirNotFound(PathBuf),

    /// The window starts after it ends
    #[error("Start date {since} is after end date {until}")]
    InvalidWindow {
        /// First day of the window
        since: NaiveDate,
        /// Last day of the window
        until: NaiveDate,
    },

    /// A zero timeout would fail every query
    #[error("Timeout must be at least one second")]
    ZeroTimeout,

    /// No workspace given and no current directory
    #[error("No open project directory")]
    NoWorkingDirectory,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 8).expect("valid date")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.author.is_none());
        assert!(config.since.is_none());
        assert!(config.until.is_none());
        assert!(config.workspace.is_none());
        assert_eq!(config.locale, Locale::ZhCn);
        assert_eq!(config.format, OutputFormat::Markdown);
        assert!(!config.verbose);
        assert!(!config.quiet);
        assert!(!config.interactive);
    }

    #[test]
    fn test_default_window_is_last_week() {
        let config = Config::default();
        assert_eq!(
            config.since_or_default(today()),
            NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
        );
        assert_eq!(config.until_or_default(today()), today());
    }

    #[test]
    fn test_explicit_window() {
        let since = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let until = NaiveDate::from_ymd_opt(2024, 1, 31).expect("valid date");
        let config = Config {
            since: Some(since),
            until: Some(until),
            ..Default::default()
        };
        assert_eq!(config.since_or_default(today()), since);
        assert_eq!(config.until_or_default(today()), until);
    }

    #[test]
    fn test_timeout_and_git_defaults() {
        let config = Config::default();
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.git_binary(), PathBuf::from("git"));
    }

    #[test]
    fn test_workspace_path() {
        // Falls back to the current directory
        assert!(Config::default().workspace_path().is_some());

        let repo = PathBuf::from("/srv/repo");
        let config = Config {
            workspace: Some(repo.clone()),
            ..Default::default()
        };
        assert_eq!(config.workspace_path(), Some(repo));
    }

    #[test]
    fn test_log_levels() {
        let level = |verbose, quiet| {
            Config {
                verbose,
                quiet,
                ..Default::default()
            }
            .log_level()
        };
        assert_eq!(level(false, false), tracing::Level::INFO);
        assert_eq!(level(true, false), tracing::Level::DEBUG);
        assert_eq!(level(false, true), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_workspace() {
        let config = Config {
            workspace: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        let result = config.validate(today());
        assert!(matches!(result, Err(ConfigError::WorkspaceNotFound(_))));
    }

    #[test]
    fn test_validate_nonexistent_output_dir() {
        let config = Config {
            output_dir: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        let result = config.validate(today());
        assert!(matches!(result, Err(ConfigError::OutputDirNotFound(_))));
    }

    #[test]
    fn test_validate_reversed_window() {
        let config = Config {
            since: NaiveDate::from_ymd_opt(2024, 3, 9),
            ..Default::default()
        };
        let result = config.validate(today());
        assert!(matches!(result, Err(ConfigError::InvalidWindow { .. })));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(today()), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_validate_valid_workspace() {
        let config = Config {
            workspace: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(config.validate(today()).is_ok());
    }

    #[test]
    fn test_request_carries_settings() {
        let config = Config {
            author: Some("alice".to_string()),
            workspace: Some(PathBuf::from("/tmp")),
            locale: Locale::EnUs,
            format: OutputFormat::Json,
            timeout: Some(5),
            time_zone: Some("UTC".to_string()),
            stdout: true,
            write_empty: true,
            ..Default::default()
        };
        let request = config.request(today()).expect("request");

        assert_eq!(request.author.as_deref(), Some("alice"));
        assert_eq!(request.workspace, PathBuf::from("/tmp"));
        assert_eq!(request.since, NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"));
        assert_eq!(request.until, today());
        assert_eq!(request.locale, Locale::EnUs);
        assert_eq!(request.format, OutputFormat::Json);
        assert_eq!(request.timeout, Duration::from_secs(5));
        assert_eq!(request.time_zone.as_deref(), Some("UTC"));
        assert!(request.to_stdout);
        assert!(request.write_empty);
    }

    #[test]
    fn test_apply_answers_keeps_unanswered_values() {
        let mut config = Config {
            author: Some("alice".to_string()),
            ..Default::default()
        };
        config.apply_answers(Answers {
            author: None,
            since: NaiveDate::from_ymd_opt(2024, 2, 1),
            until: None,
        });
        assert_eq!(config.author.as_deref(), Some("alice"));
        assert_eq!(config.since, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(config.until.is_none());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-04"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date"))
        );
        assert!(parse_date("03/04/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
