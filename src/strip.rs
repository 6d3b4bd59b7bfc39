//! Removal of forwarding header noise from body text

use crate::forward::read_fields;
use crate::headers::{HeaderField, block_marker, fenced_lines, header_field, reply_attribution};
use tracing::trace;

/// Header fields needed before an unmarked `From:` run counts as a header block
const MIN_BARE_FIELDS: usize = 2;

/// Remove forwarding header blocks and `On ... wrote:` lines from `body`.
///
/// Marker lines (Gmail, Outlook, Apple Mail, `Original Message`) are removed
/// together with the `From:`/`Date:`/`Subject:`/`To:`/`Cc:` lines that follow
/// them. Unmarked runs of header fields starting with `From:` are removed as
/// well. Fenced code is never touched.
///
/// Only the seams around a removed block are tidied: blank lines on either
/// side collapse into one. Text without recognized headers comes back
/// byte-identical, and stripping the result again changes nothing.
#[must_use]
pub fn strip_forward_headers(body: &str) -> String {
    let mut current = body.to_string();
    while let Some(next) = strip_once(&current) {
        current = next;
    }
    current
}

/// One pass over `body`, or `None` when nothing was recognized.
fn strip_once(body: &str) -> Option<String> {
    let lines: Vec<&str> = body.lines().collect();
    let fenced = fenced_lines(&lines);
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut removed_any = false;
    // Set after a removal until the next kept content line
    let mut seam: Option<bool> = None;
    let mut i = 0;

    while i < lines.len() {
        if !fenced[i]
            && let Some(next) = header_span(&lines, i)
        {
            let mut blank_before = false;
            while kept.last().is_some_and(|line| line.trim().is_empty()) {
                kept.pop();
                blank_before = true;
            }
            removed_any = true;
            seam = Some(seam.unwrap_or(false) || blank_before);
            i = next;
            continue;
        }

        if let Some(blank) = seam {
            if !fenced[i] && lines[i].trim().is_empty() {
                seam = Some(true);
                i += 1;
                continue;
            }
            if blank && !kept.is_empty() {
                kept.push("");
            }
            seam = None;
        }

        kept.push(lines[i]);
        i += 1;
    }

    removed_any.then(|| kept.join("\n"))
}

/// End of the header block starting at `lines[i]`, if one starts there.
fn header_span(lines: &[&str], i: usize) -> Option<usize> {
    if let Some(marker) = block_marker(lines[i]) {
        let (fields, next) = read_fields(lines, i + 1);
        trace!(?marker, fields = fields.len(), line = i, "stripping header block");
        return Some(next.max(i + 1));
    }

    if let Some((_, span)) = reply_attribution(lines, i) {
        trace!(line = i, "stripping reply attribution");
        return Some(i + span);
    }

    if let Some((HeaderField::From, _)) = header_field(lines[i]) {
        let (fields, next) = read_fields(lines, i);
        if fields.len() >= MIN_BARE_FIELDS {
            trace!(fields = fields.len(), line = i, "stripping unmarked header run");
            return Some(next);
        }
    }

    None
}
