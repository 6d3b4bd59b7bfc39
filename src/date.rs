//! Best-effort parsing of human-written header dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Formats carrying a numeric UTC offset
const OFFSET_FORMATS: &[&str] = &[
    "%a %d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M:%S %z",
    "%a %b %d %Y %H:%M:%S %z",
    "%b %d %Y %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S %z",
    "%a %d %b %Y %H:%M %z",
    "%d %b %Y %H:%M %z",
];

/// Formats without a zone, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%a %b %d %Y %I:%M %p",
    "%a %b %d %Y %I:%M:%S %p",
    "%a %d %b %Y %I:%M %p",
    "%a %d %b %Y %H:%M:%S",
    "%a %d %b %Y %H:%M",
    "%a %b %d %Y %H:%M",
    "%b %d %Y %I:%M %p",
    "%b %d %Y %I:%M:%S %p",
    "%b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M",
    "%d %b %Y %I:%M %p",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%a %b %d %Y",
    "%a %d %b %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

/// Parse a date as written by mail clients in forwarded headers.
///
/// Handles RFC 2822/3339, Gmail's `Mon, Dec 9, 2024 at 10:30 AM`, Outlook's
/// `Monday, December 9, 2024 10:30 AM` and a handful of numeric forms.
/// Returns `None` instead of failing on anything unrecognized.
#[must_use]
pub fn parse_header_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let normalized = normalize(value);
    parse_normalized(&normalized).or_else(|| {
        // A weekday that disagrees with the date makes chrono reject the
        // whole string, so retry without it.
        let (first, rest) = normalized.split_once(' ')?;
        is_weekday(first).then(|| parse_normalized(rest)).flatten()
    })
}

/// Collapse whitespace, drop commas, the word `at`, zone names and
/// parenthesized comments.
fn normalize(value: &str) -> String {
    let mut without_comments = String::with_capacity(value.len());
    let mut depth = 0usize;
    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => without_comments.push(c),
            _ => {}
        }
    }

    let mut words: Vec<&str> = without_comments
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|word| !word.is_empty() && !word.eq_ignore_ascii_case("at"))
        .map(|word| word.trim_end_matches('.'))
        .collect();

    // Zone abbreviations (PST, CET, GMT) carry no usable offset
    if words.last().is_some_and(|word| is_zone_name(word)) {
        words.pop();
    }

    words.join(" ")
}

fn is_zone_name(word: &str) -> bool {
    (2..=5).contains(&word.len())
        && word.chars().all(|c| c.is_ascii_uppercase())
        && word != "AM"
        && word != "PM"
}

fn parse_normalized(s: &str) -> Option<DateTime<Utc>> {
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

fn is_weekday(word: &str) -> bool {
    let word = word.to_lowercase();
    word.len() >= 3 && WEEKDAYS.iter().any(|day| day.starts_with(&word))
}
