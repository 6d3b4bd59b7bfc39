//! Recovery of the original sender and date from a forwarded thread

use crate::date::parse_header_date;
use crate::headers::{
    HeaderField, Marker, block_marker, fenced_lines, header_field, reply_attribution,
};
use crate::types::{EmailAddress, ForwardInfo, SelfAddresses};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Blank lines tolerated between a marker and its first header field
const MAX_GAP_AFTER_MARKER: usize = 2;

/// One recognized forwarding header block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub marker: Marker,
    pub sender: Option<EmailAddress>,
    pub date: Option<DateTime<Utc>>,
    /// Index of the marker line in the scanned text
    pub line: usize,
}

/// Find the sender of the externally authored message in `body`.
///
/// Header blocks are visited in document order and the first whose sender
/// is not one of `self_addresses` wins, together with the date of that same
/// block. When no block qualifies, the first non-self `From:` line anywhere
/// is used with the nearest `Date:`/`Sent:` line after it.
#[must_use]
pub fn extract_forward_info(body: &str, self_addresses: &SelfAddresses) -> ForwardInfo {
    let lines: Vec<&str> = body.lines().collect();

    for block in scan_header_blocks(&lines) {
        let Some(sender) = block.sender else {
            continue;
        };
        if self_addresses.contains(&sender) {
            debug!(
                address = %sender.address,
                line = block.line,
                "skipping self-authored header block"
            );
            continue;
        }

        debug!(
            address = %sender.address,
            marker = ?block.marker,
            has_date = block.date.is_some(),
            "original sender found in header block"
        );
        return ForwardInfo {
            original_sender: Some(sender),
            original_date: block.date,
        };
    }

    let info = loose_scan(&lines, self_addresses);
    if let Some(sender) = &info.original_sender {
        debug!(address = %sender.address, "original sender found by loose From: scan");
    } else {
        debug!("no external sender in body");
    }
    info
}

/// Recognize every forwarding header block in document order.
///
/// Lines inside fenced code are never read as headers.
#[must_use]
pub fn scan_header_blocks(lines: &[&str]) -> Vec<HeaderBlock> {
    let fenced = fenced_lines(lines);
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if fenced[i] {
            i += 1;
            continue;
        }

        if let Some(marker) = block_marker(lines[i]) {
            let (fields, next) = read_fields(lines, i + 1);
            blocks.push(block_from_fields(marker, i, &fields));
            i = next;
            continue;
        }

        if let Some((attribution, span)) = reply_attribution(lines, i) {
            let (sender, date) = split_attribution(&attribution);
            blocks.push(HeaderBlock {
                marker: Marker::Reply,
                sender,
                date,
                line: i,
            });
            i += span;
            continue;
        }

        i += 1;
    }

    blocks
}

/// Read the header fields following a marker.
///
/// Returns the fields and the index of the first line after the block. A
/// marker with no fields consumes nothing beyond itself.
pub(crate) fn read_fields<'a>(
    lines: &[&'a str],
    start: usize,
) -> (Vec<(HeaderField, &'a str)>, usize) {
    let mut i = start;
    while i < lines.len() && i - start < MAX_GAP_AFTER_MARKER && lines[i].trim().is_empty() {
        i += 1;
    }

    let mut fields = Vec::new();
    while let Some(field) = lines.get(i).copied().and_then(header_field) {
        fields.push(field);
        i += 1;
    }

    if fields.is_empty() {
        (fields, start)
    } else {
        (fields, i)
    }
}

fn block_from_fields(marker: Marker, line: usize, fields: &[(HeaderField, &str)]) -> HeaderBlock {
    let first = |wanted: HeaderField| {
        fields
            .iter()
            .find(|(field, _)| *field == wanted)
            .map(|(_, value)| *value)
    };

    HeaderBlock {
        marker,
        sender: first(HeaderField::From).and_then(EmailAddress::parse),
        date: first(HeaderField::Date).and_then(parse_header_date),
        line,
    }
}

/// Split `Mon, Dec 9, 2024 at 10:30 AM John Doe <john@example.com>` into
/// its sender and date.
///
/// The longest run of leading words that parses as a date is taken as the
/// date; whatever sits between it and the address becomes the display name.
fn split_attribution(text: &str) -> (Option<EmailAddress>, Option<DateTime<Utc>>) {
    let Some(mut sender) = EmailAddress::parse(text) else {
        return (None, None);
    };

    let prefix_end = text
        .find('<')
        .or_else(|| text.find(&sender.address))
        .unwrap_or(text.len());
    let words: Vec<&str> = text[..prefix_end].split_whitespace().collect();

    let found = (1..=words.len())
        .rev()
        .find_map(|n| parse_header_date(&words[..n].join(" ")).map(|date| (n, date)));

    let (date, name_words) = match found {
        Some((n, date)) => (Some(date), &words[n..]),
        None => (None, &words[..]),
    };

    let name = name_words
        .join(" ")
        .trim_matches(|c: char| c == ',' || c == '"' || c == '*' || c.is_whitespace())
        .to_string();
    sender.name = if name.is_empty() { None } else { Some(name) };

    (Some(sender), date)
}

/// Fallback: first non-self `From:` line anywhere, paired with the nearest
/// `Date:`/`Sent:` line after it.
fn loose_scan(lines: &[&str], self_addresses: &SelfAddresses) -> ForwardInfo {
    let fenced = fenced_lines(lines);
    for (i, line) in lines.iter().enumerate() {
        if fenced[i] {
            continue;
        }
        let Some((HeaderField::From, value)) = header_field(line) else {
            continue;
        };
        let Some(sender) = EmailAddress::parse(value) else {
            continue;
        };
        if self_addresses.contains(&sender) {
            continue;
        }

        let original_date = lines[i + 1..]
            .iter()
            .zip(&fenced[i + 1..])
            .filter(|(_, in_fence)| !**in_fence)
            .find_map(|(line, _)| match header_field(line) {
                Some((HeaderField::Date, value)) => Some(value),
                _ => None,
            })
            .and_then(parse_header_date);

        return ForwardInfo {
            original_sender: Some(sender),
            original_date,
        };
    }

    ForwardInfo::default()
}
