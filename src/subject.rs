//! Subject line tag extraction and forwarding-prefix normalization

use crate::types::{MISSING_TAG, ParsedSubject};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Maximum length of a sanitized tag
pub const MAX_TAG_LEN: usize = 50;

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^#([^\s:]+):?\s*(.*)$").unwrap());

static PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:fwd|fw|re|reply):\s*").unwrap());

/// Split a subject into its `#tag` and the cleaned subject text.
///
/// Never fails: a missing or unusable tag yields [`MISSING_TAG`].
#[must_use]
pub fn parse_subject(subject: &str) -> ParsedSubject {
    let subject = subject.trim();

    let (tag, rest) = TAG_REGEX.captures(subject).map_or_else(
        || (MISSING_TAG.to_string(), subject),
        |caps| {
            let token = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            (sanitize_tag(token), rest)
        },
    );

    let clean_subject = strip_forward_prefixes(rest).trim().to_string();
    trace!(%tag, %clean_subject, "parsed subject");

    ParsedSubject { tag, clean_subject }
}

/// Lowercase, drop everything outside `[a-z0-9]`, truncate to [`MAX_TAG_LEN`].
#[must_use]
pub fn sanitize_tag(token: &str) -> String {
    let tag: String = token
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_TAG_LEN)
        .collect();

    if tag.is_empty() {
        MISSING_TAG.to_string()
    } else {
        tag
    }
}

/// Remove any chain of `Fwd:`/`Fw:`/`Re:`/`Reply:` prefixes.
#[must_use]
pub fn strip_forward_prefixes(subject: &str) -> &str {
    let mut rest = subject.trim_start();
    while let Some(m) = PREFIX_REGEX.find(rest) {
        rest = rest[m.end()..].trim_start();
    }
    rest
}
