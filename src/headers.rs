//! Line recognizers for machine-generated forwarding headers.
//!
//! Each recognizer looks at a single line (or a short window of lines for
//! wrapped reply attributions) and is evaluated in a fixed order by the
//! extractor and the stripper.

use crate::date::parse_header_date;
use crate::types::EmailAddress;
use regex::Regex;
use std::sync::LazyLock;

/// Longest reply attribution, in bytes, that is still treated as a marker
const MAX_ATTRIBUTION_LEN: usize = 400;

static GMAIL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^-{2,}\s*forwarded message\s*-{2,}$").unwrap());

static ORIGINAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^-{2,}\s*original message\s*-{2,}$").unwrap());

static OUTLOOK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\\?_){10,}$").unwrap());

static APPLE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^begin forwarded message:?$").unwrap());

static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\*{0,2}(from|date|sent|subject|to|cc)\s*:\s*\*{0,2}\s*(.*)$").unwrap()
});

/// Kind of forwarding header block opener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `---------- Forwarded message ---------`
    Gmail,
    /// A line of underscores
    Outlook,
    /// `Begin forwarded message:`
    AppleMail,
    /// `-----Original Message-----`
    OriginalMessage,
    /// `On <date>, <sender> wrote:`
    Reply,
}

/// Header field names found inside a forwarding block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    From,
    /// `Date:` or Outlook's `Sent:`
    Date,
    Subject,
    To,
    Cc,
}

/// Drop reply quoting (`>`, `> >`) and surrounding whitespace.
#[must_use]
pub fn unquote(line: &str) -> &str {
    line.trim_start_matches(|c: char| c == '>' || c.is_whitespace())
        .trim_end()
}

/// Recognize a single-line block marker.
///
/// Reply attributions can wrap over two lines and are handled by
/// [`reply_attribution`] instead.
#[must_use]
pub fn block_marker(line: &str) -> Option<Marker> {
    let line = unquote(line).trim_matches('*').trim();
    if line.is_empty() {
        return None;
    }

    [
        (&*GMAIL_MARKER, Marker::Gmail),
        (&*OUTLOOK_MARKER, Marker::Outlook),
        (&*APPLE_MARKER, Marker::AppleMail),
        (&*ORIGINAL_MARKER, Marker::OriginalMessage),
    ]
    .into_iter()
    .find(|(regex, _)| regex.is_match(line))
    .map(|(_, marker)| marker)
}

/// Recognize a `Name: value` header field line.
#[must_use]
pub fn header_field(line: &str) -> Option<(HeaderField, &str)> {
    let caps = FIELD_REGEX.captures(unquote(line))?;
    let name = caps.get(1)?.as_str().to_ascii_lowercase();
    let value = caps.get(2).map_or("", |m| m.as_str().trim());

    let field = match name.as_str() {
        "from" => HeaderField::From,
        "date" | "sent" => HeaderField::Date,
        "subject" => HeaderField::Subject,
        "to" => HeaderField::To,
        _ => HeaderField::Cc,
    };
    Some((field, value))
}

/// Recognize an `On ... wrote:` attribution starting at `lines[i]`.
///
/// Returns the attribution text with the `On ` and ` wrote:` parts removed,
/// and the number of lines it spans (one or two).
#[must_use]
pub fn reply_attribution(lines: &[&str], i: usize) -> Option<(String, usize)> {
    let first = unquote(lines.get(i)?);
    if !first.starts_with("On ") {
        return None;
    }

    if first.ends_with("wrote:") {
        return attribution_body(first).map(|body| (body, 1));
    }

    let second = unquote(lines.get(i + 1)?);
    if second.ends_with("wrote:") && !second.starts_with("On ") {
        let joined = format!("{first} {second}");
        return attribution_body(&joined)
            .filter(|body| names_sender_or_date(body))
            .map(|body| (body, 2));
    }

    None
}

/// Whether attribution text names a sender address or starts with a date.
fn names_sender_or_date(body: &str) -> bool {
    if EmailAddress::parse(body).is_some() {
        return true;
    }
    let words: Vec<&str> = body.split_whitespace().collect();
    (1..=words.len()).any(|n| parse_header_date(&words[..n].join(" ")).is_some())
}

/// Mark the lines belonging to fenced code blocks, fence lines included.
///
/// An unclosed fence runs to the end of the text.
#[must_use]
pub fn fenced_lines(lines: &[&str]) -> Vec<bool> {
    let mut in_fence = false;
    lines
        .iter()
        .map(|line| {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                true
            } else {
                in_fence
            }
        })
        .collect()
}

fn attribution_body(line: &str) -> Option<String> {
    if line.len() > MAX_ATTRIBUTION_LEN {
        return None;
    }
    let body = line.strip_prefix("On ")?.strip_suffix("wrote:")?;
    Some(body.trim().trim_end_matches(',').trim().to_string())
}
