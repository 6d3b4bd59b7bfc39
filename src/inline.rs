//! Inline rich-text span recognition.
//!
//! A shallow, single-pass recognizer: links are split out first, then each
//! remaining run is scanned for emphasis. A matched segment carries exactly
//! one annotation category; nested markers inside it are kept as text.

use crate::types::{Annotations, RichTextSpan};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Start of the private-use range standing in for escaped ASCII punctuation
const ESCAPE_BASE: u32 = 0xE000;

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(((?:[^\s()]|\([^\s()]*\))+)\)").unwrap());

// Alternation order is the precedence: bold, italic, strikethrough, code.
static EMPHASIS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\*\*(?P<bold_star>[^*]+?)\*\*",
        r"|__(?P<bold_under>[^_]+?)__",
        r"|\*(?P<italic_star>[^*\s](?:[^*]*[^*\s])?)\*",
        r"|\b_(?P<italic_under>[^_]+?)_\b",
        r"|~~(?P<strike>[^~]+?)~~",
        r"|`(?P<code>[^`]+)`",
    ))
    .unwrap()
});

static ESCAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([!-/:-@\[-`{-~])").unwrap());

/// Parse one line of markup into rich-text spans.
#[must_use]
pub fn parse_inline(text: &str) -> Vec<RichTextSpan> {
    let text = protect_escapes(text);
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in LINK_REGEX.captures_iter(&text) {
        let whole = caps.get_match();
        push_emphasis(&text[last..whole.start()], None, &mut spans);

        let label = &caps[1];
        let url = restore_escapes(&caps[2]);
        if label.trim().is_empty() {
            spans.push(RichTextSpan::linked(url.clone(), url));
        } else {
            push_emphasis(label, Some(&url), &mut spans);
        }
        last = whole.end();
    }
    push_emphasis(&text[last..], None, &mut spans);

    spans
}

fn push_emphasis(run: &str, link: Option<&str>, spans: &mut Vec<RichTextSpan>) {
    let mut last = 0;
    for caps in EMPHASIS_REGEX.captures_iter(run) {
        let whole = caps.get_match();
        push_span(&run[last..whole.start()], Annotations::PLAIN, link, spans);

        let (content, annotations) = emphasis_of(&caps);
        push_span(content, annotations, link, spans);
        last = whole.end();
    }
    push_span(&run[last..], Annotations::PLAIN, link, spans);
}

fn emphasis_of<'t>(caps: &Captures<'t>) -> (&'t str, Annotations) {
    [
        ("bold_star", Annotations::BOLD),
        ("bold_under", Annotations::BOLD),
        ("italic_star", Annotations::ITALIC),
        ("italic_under", Annotations::ITALIC),
        ("strike", Annotations::STRIKETHROUGH),
        ("code", Annotations::CODE),
    ]
    .into_iter()
    .find_map(|(group, annotations)| caps.name(group).map(|m| (m.as_str(), annotations)))
    .unwrap_or(("", Annotations::PLAIN))
}

fn push_span(
    content: &str,
    annotations: Annotations,
    link: Option<&str>,
    spans: &mut Vec<RichTextSpan>,
) {
    if content.is_empty() {
        return;
    }
    spans.push(RichTextSpan {
        content: restore_escapes(content),
        annotations,
        link: link.map(str::to_string),
    });
}

/// Replace `\*`-style escapes with private-use characters so the markers
/// they protect are invisible to the recognizers.
fn protect_escapes(text: &str) -> String {
    ESCAPE_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            caps[1]
                .chars()
                .next()
                .and_then(|c| char::from_u32(ESCAPE_BASE + u32::from(c)))
                .map(String::from)
                .unwrap_or_default()
        })
        .into_owned()
}

fn restore_escapes(text: &str) -> String {
    text.chars()
        .map(|c| {
            let code = u32::from(c);
            if (ESCAPE_BASE..ESCAPE_BASE + 0x80).contains(&code) {
                char::from_u32(code - ESCAPE_BASE).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
