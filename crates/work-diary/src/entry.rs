// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Log entry normalization
//!
//! Turns extracted [`RawCommit`] records into [`LogEntry`] values carrying the
//! presentation fields used by the renderer: sort key, time of day, calendar
//! date, localized weekday and the reformatted message block.
//!
//! The raw timestamp is a contract with the `--date=format-local:` directive of the
//! log query. Anything that does not match it exactly is reported as an
//! [`EntryError`] instead of being rendered.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;
use serde::Serialize;
use work_diary_git::RawCommit;

/// Regex for the raw timestamp
/// Format: `YYYY-MM-DD HH:MM:SS Weekday`
/// Example: `2024-03-04 09:15:00 Monday`
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>\d{4}-\d{2}-\d{2}) (?P<time>\d{2}:\d{2}:\d{2}) (?P<weekday>[A-Za-z]+)$")
        .expect("Invalid timestamp regex")
});

/// Regex for a leading `<digits>、` list marker
static LIST_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)、\s*").expect("Invalid list marker regex"));

/// Segment separator used inside commit messages besides newlines
const FULLWIDTH_SEMICOLON: char = '；';

/// Errors raised when a record breaks the timestamp contract
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The timestamp does not have the expected layout or values
    #[error("Malformed timestamp {timestamp:?}: {reason}")]
    ContractViolation {
        /// The offending raw timestamp
        timestamp: String,
        /// What was wrong with it
        reason: String,
    },

    /// The weekday is not one of the seven English names
    #[error("Unknown weekday name {name:?}")]
    UnknownWeekday {
        /// The unrecognized name
        name: String,
    },
}

/// Target locale for weekday labels and document text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum Locale {
    /// Simplified Chinese
    #[default]
    #[value(name = "zh-cn")]
    ZhCn,
    /// US English
    #[value(name = "en-us")]
    EnUs,
}

impl Locale {
    /// Label for a weekday
    #[must_use]
    pub fn weekday_label(self, weekday: Weekday) -> &'static str {
        match self {
            Self::ZhCn => match weekday {
                Weekday::Mon => "星期一",
                Weekday::Tue => "星期二",
                Weekday::Wed => "星期三",
                Weekday::Thu => "星期四",
                Weekday::Fri => "星期五",
                Weekday::Sat => "星期六",
                Weekday::Sun => "星期日",
            },
            Self::EnUs => match weekday {
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
                Weekday::Sun => "Sunday",
            },
        }
    }

    /// Document file name without extension
    #[must_use]
    pub fn file_stem(self, since: NaiveDate, until: NaiveDate) -> String {
        match self {
            Self::ZhCn => format!("工作日志 {since}到{until}"),
            Self::EnUs => format!("work-log {since} to {until}"),
        }
    }

    /// Document title naming the author and the window
    #[must_use]
    pub fn title(self, author: &str, since: NaiveDate, until: NaiveDate) -> String {
        match self {
            Self::ZhCn => format!("# {author} 工作日志 {since} 到 {until}"),
            Self::EnUs => format!("# Work log of {author}: {since} to {until}"),
        }
    }
}

/// Map an English weekday name, as printed by git's `%A`, to a weekday
///
/// # Errors
///
/// Returns `EntryError::UnknownWeekday` for anything but the seven full names.
pub fn english_weekday(name: &str) -> Result<Weekday, EntryError> {
    match name {
        "Monday" => Ok(Weekday::Mon),
        "Tuesday" => Ok(Weekday::Tue),
        "Wednesday" => Ok(Weekday::Wed),
        "Thursday" => Ok(Weekday::Thu),
        "Friday" => Ok(Weekday::Fri),
        "Saturday" => Ok(Weekday::Sat),
        "Sunday" => Ok(Weekday::Sun),
        _ => Err(EntryError::UnknownWeekday {
            name: name.to_string(),
        }),
    }
}

/// The named fields of a raw timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Calendar date
    pub date: NaiveDate,
    /// Time of day
    pub time: NaiveTime,
    /// Weekday, consistent with `date`
    pub weekday: Weekday,
}

impl Timestamp {
    /// Combined date and time, used as the sort key
    #[must_use]
    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS Weekday` timestamp
///
/// # Errors
///
/// Returns `EntryError::ContractViolation` if the layout or any value is
/// wrong, including a weekday that disagrees with the date, and
/// `EntryError::UnknownWeekday` for an unrecognized weekday name.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, EntryError> {
    let violation = |reason: String| EntryError::ContractViolation {
        timestamp: raw.to_string(),
        reason,
    };

    let caps = TIMESTAMP_REGEX
        .captures(raw)
        .ok_or_else(|| violation("expected `YYYY-MM-DD HH:MM:SS Weekday`".to_string()))?;

    let date = NaiveDate::parse_from_str(&caps["date"], "%Y-%m-%d")
        .map_err(|e| violation(format!("invalid date: {e}")))?;
    let time = NaiveTime::parse_from_str(&caps["time"], "%H:%M:%S")
        .map_err(|e| violation(format!("invalid time: {e}")))?;
    let weekday = english_weekday(&caps["weekday"])?;

    if date.weekday() != weekday {
        return Err(violation(format!(
            "{date} is a {}, not a {weekday}",
            date.weekday()
        )));
    }

    Ok(Timestamp {
        date,
        time,
        weekday,
    })
}

/// Reformat a commit message into a block of list lines
///
/// Newlines and full-width semicolons separate segments. Whitespace runs
/// inside a segment collapse to one space, empty segments are dropped, and a
/// leading `<digits>、` becomes a `- [<digits>] ` checkbox marker. Every
/// remaining segment ends with a newline.
#[must_use]
pub fn format_message(message: &str) -> String {
    let mut block = String::new();
    for segment in message.split(['\n', FULLWIDTH_SEMICOLON]) {
        let line = segment.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            continue;
        }
        let line = LIST_MARKER_REGEX.replace(&line, "- [$1] ");
        block.push_str(line.trim_end());
        block.push('\n');
    }
    block
}

/// A normalized commit ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Author name
    pub author: String,
    /// Timestamp as printed by git
    pub raw_timestamp: String,
    /// Original commit message
    pub message: String,
    /// Sort key
    pub timestamp: NaiveDateTime,
    /// Calendar date
    pub date: NaiveDate,
    /// `HH:MM:SS`
    pub time_of_day: String,
    /// Weekday of `date`
    pub weekday: Weekday,
    /// Localized weekday label
    pub weekday_label: &'static str,
    /// Message block produced by [`format_message`]
    pub formatted_message: String,
}

impl LogEntry {
    /// Normalize one extracted record
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if the record's timestamp breaks the contract.
    pub fn from_raw(raw: RawCommit, locale: Locale) -> Result<Self, EntryError> {
        let ts = parse_timestamp(&raw.date)?;
        let formatted_message = format_message(&raw.message);

        Ok(Self {
            author: raw.author,
            timestamp: ts.datetime(),
            date: ts.date,
            time_of_day: ts.time.format("%H:%M:%S").to_string(),
            weekday: ts.weekday,
            weekday_label: locale.weekday_label(ts.weekday),
            raw_timestamp: raw.date,
            message: raw.message,
            formatted_message,
        })
    }
}

/// Normalize every record, failing on the first contract violation
///
/// # Errors
///
/// Returns the first `EntryError` encountered.
pub fn normalize_all(raws: Vec<RawCommit>, locale: Locale) -> Result<Vec<LogEntry>, EntryError> {
    raws.into_iter()
        .map(|raw| LogEntry::from_raw(raw, locale))
        .collect()
}
