//! Length-bounded splitting of text for size-limited stores

use crate::types::RichTextSpan;
use std::ops::Range;

/// Per-span character limit of the page store
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 2000;

/// Split `text` into byte ranges of at most `max_chars` characters each.
///
/// A chunk ends at the last newline within the limit, else at the last space,
/// else it is cut hard at the limit. The newline or space a chunk breaks on
/// belongs to no chunk, so joining the chunks with it restores the text.
#[must_use]
pub fn chunk_ranges(text: &str, max_chars: usize) -> Vec<Range<usize>> {
    let max_chars = max_chars.max(1);
    let mut ranges = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let rest = &text[start..];
        let mut chars = rest.char_indices().skip(max_chars);
        let Some((limit, boundary)) = chars.next() else {
            ranges.push(start..text.len());
            break;
        };

        // The character right after the limit may itself be the break.
        let window = &rest[..limit + boundary.len_utf8()];
        let (cut, skip) = if let Some(i) = window.rfind('\n').filter(|&i| i > 0) {
            (i, 1)
        } else if let Some(i) = window.rfind(' ').filter(|&i| i > 0) {
            (i, 1)
        } else {
            (limit, 0)
        };

        ranges.push(start..start + cut);
        start += cut + skip;
    }

    ranges
}

/// Split `text` into string chunks; see [`chunk_ranges`].
#[must_use]
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    chunk_ranges(text, max_chars)
        .into_iter()
        .map(|range| &text[range])
        .collect()
}

/// Split a span sequence so that no group carries more than `max_chars`
/// characters of text.
///
/// Break points are chosen on the concatenated span text exactly as in
/// [`chunk_ranges`]; spans crossing a break are cut in two, each half keeping
/// its annotations and link.
#[must_use]
pub fn chunk_spans(spans: &[RichTextSpan], max_chars: usize) -> Vec<Vec<RichTextSpan>> {
    let text: String = spans.iter().map(|s| s.content.as_str()).collect();
    if text.chars().count() <= max_chars {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![spans.to_vec()]
        };
    }

    chunk_ranges(&text, max_chars)
        .into_iter()
        .map(|range| slice_spans(spans, &range))
        .filter(|group| !group.is_empty())
        .collect()
}

/// The parts of `spans` that fall inside `range` of their concatenated text.
fn slice_spans(spans: &[RichTextSpan], range: &Range<usize>) -> Vec<RichTextSpan> {
    let mut out = Vec::new();
    let mut offset = 0;

    for span in spans {
        let span_range = offset..offset + span.content.len();
        offset = span_range.end;

        let start = range.start.max(span_range.start);
        let end = range.end.min(span_range.end);
        if start >= end {
            continue;
        }

        out.push(RichTextSpan {
            content: span.content[start - span_range.start..end - span_range.start].to_string(),
            annotations: span.annotations,
            link: span.link.clone(),
        });
    }

    out
}
