// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Interactive prompts
//!
//! Asks for author, start date and end date on a line-oriented input. An
//! empty answer (or end of input) keeps the default; a date that does not
//! parse is asked again.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use crate::entry::Locale;

/// Values shown as defaults at the prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Author used when the answer is empty, if known
    pub author: Option<String>,
    /// Start date used when the answer is empty
    pub since: NaiveDate,
    /// End date used when the answer is empty
    pub until: NaiveDate,
}

/// Values entered at the prompts; `None` means keep the default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    /// Entered author
    pub author: Option<String>,
    /// Entered start date
    pub since: Option<NaiveDate>,
    /// Entered end date
    pub until: Option<NaiveDate>,
}

/// Ask the three questions in order
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `output`.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: &Defaults,
    locale: Locale,
) -> io::Result<Answers> {
    let author_default = defaults.author.as_deref().unwrap_or("git user.name");
    let author = ask_line(input, output, &author_prompt(locale, author_default))?;

    let since = ask_date(input, output, &date_prompt(locale, true, defaults.since), locale)?;
    let until = ask_date(input, output, &date_prompt(locale, false, defaults.until), locale)?;

    Ok(Answers {
        author,
        since,
        until,
    })
}

fn author_prompt(locale: Locale, default: &str) -> String {
    match locale {
        Locale::ZhCn => format!("作者 (不输入默认为 {default}): "),
        Locale::EnUs => format!("Author (default: {default}): "),
    }
}

fn date_prompt(locale: Locale, start: bool, default: NaiveDate) -> String {
    match (locale, start) {
        (Locale::ZhCn, true) => format!("开始时间 (格式: YYYY-MM-DD 不输入默认为 {default}): "),
        (Locale::ZhCn, false) => format!("结束时间 (格式: YYYY-MM-DD 不输入默认为 {default}): "),
        (Locale::EnUs, true) => format!("Start date (YYYY-MM-DD, default: {default}): "),
        (Locale::EnUs, false) => format!("End date (YYYY-MM-DD, default: {default}): "),
    }
}

/// Read one trimmed answer; `None` for an empty line or end of input
fn ask_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

fn ask_date<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    locale: Locale,
) -> io::Result<Option<NaiveDate>> {
    loop {
        let Some(answer) = ask_line(input, output, prompt)? else {
            return Ok(None);
        };
        match NaiveDate::parse_from_str(&answer, "%Y-%m-%d") {
            Ok(date) => return Ok(Some(date)),
            Err(_) => {
                let hint = match locale {
                    Locale::ZhCn => "日期格式错误, 请使用 YYYY-MM-DD",
                    Locale::EnUs => "Invalid date, use YYYY-MM-DD",
                };
                writeln!(output, "{hint}")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use std::io::Cursor;

    fn defaults() -> Defaults {
        Defaults {
            author: Some("alice".to_string()),
            since: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            until: NaiveDate::from_ymd_opt(2024, 3, 8).expect("valid date"),
        }
    }

    fn run(input: &str, locale: Locale) -> (Answers, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let answers = ask(&mut input, &mut output, &defaults(), locale).expect("prompt");
        (answers, String::from_utf8(output).expect("utf8"))
    }

    #[test]
    fn test_all_answers() {
        let (answers, _) = run("bob\n2024-02-01\n2024-02-29\n", Locale::EnUs);
        assert_eq!(
            answers,
            Answers {
                author: Some("bob".to_string()),
                since: NaiveDate::from_ymd_opt(2024, 2, 1),
                until: NaiveDate::from_ymd_opt(2024, 2, 29),
            }
        );
    }

    #[test]
    fn test_empty_answers_keep_defaults() {
        let (answers, output) = run("\n  \n\n", Locale::ZhCn);
        assert_eq!(answers, Answers::default());
        assert!(output.contains("不输入默认为 alice"));
        assert!(output.contains("不输入默认为 2024-03-01"));
        assert!(output.contains("不输入默认为 2024-03-08"));
    }

    #[test]
    fn test_end_of_input_keeps_defaults() {
        let (answers, _) = run("", Locale::EnUs);
        assert_eq!(answers, Answers::default());
    }

    #[test]
    fn test_invalid_date_is_asked_again() {
        let (answers, output) = run("\nnot-a-date\n2024-02-01\n\n", Locale::EnUs);
        assert_eq!(answers.since, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(answers.until.is_none());
        assert_eq!(output.matches("Invalid date").count(), 1);
        assert_eq!(output.matches("Start date").count(), 2);
    }
}
