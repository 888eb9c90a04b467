// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Work-log document rendering
//!
//! Entries are sorted newest first and grouped by calendar date: a date
//! heading is written once, before the first entry of that date, and each
//! entry contributes a time marker line, its message block and one blank line.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::entry::{LogEntry, Locale};

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown work log
    #[default]
    Markdown,
    /// JSON array of entries
    Json,
}

impl OutputFormat {
    /// File extension for documents in this format
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

/// Title block naming the author and the requested window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Author name
    pub author: String,
    /// First day of the window
    pub since: NaiveDate,
    /// Last day of the window
    pub until: NaiveDate,
}

/// Sort entries newest first
///
/// The sort is stable: entries with the same timestamp keep their order.
pub fn sort_entries(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Document file name for a window
#[must_use]
pub fn file_name(locale: Locale, format: OutputFormat, since: NaiveDate, until: NaiveDate) -> String {
    format!("{}.{}", locale.file_stem(since, until), format.extension())
}

/// Render entries, in their current order, as a Markdown work log
#[must_use]
pub fn render_markdown(entries: &[LogEntry], header: Option<&Header>, locale: Locale) -> String {
    let mut doc = String::new();

    if let Some(header) = header {
        doc.push_str(&locale.title(&header.author, header.since, header.until));
        doc.push_str("\n\n---\n\n");
    }

    let mut seen_dates = HashSet::new();
    for entry in entries {
        if seen_dates.insert(entry.date) {
            doc.push_str(&format!(
                "### {} {}\n",
                entry.date.format("%Y-%m-%d"),
                entry.weekday_label
            ));
        }
        doc.push_str(&format!(
            "***{}***\n{}\n",
            entry.time_of_day, entry.formatted_message
        ));
    }

    doc
}

/// Render entries, in their current order, as pretty-printed JSON
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn render_json(entries: &[LogEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}
