//! Line-oriented conversion of markup text into typed blocks

use crate::chunk::{chunk_spans, chunk_text};
use crate::inline::parse_inline;
use crate::types::{Block, HeadingLevel, RichTextSpan};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Language tag given to fenced code blocks
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

static EMPTY_QUOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s>]+$").unwrap());

static DIVIDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?:-\s*){3,}|(?:_\s*){3,}|(?:\*\s*){3,})$").unwrap());

static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+]\s+(.*)$").unwrap());

static NUMBERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+(.*)$").unwrap());

static QUOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>[>\s]*(.*)$").unwrap());

/// Classification of one markup line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Heading(HeadingLevel, &'a str),
    EmptyQuote,
    Divider,
    Bullet(&'a str),
    Numbered(&'a str),
    Quote(&'a str),
    FenceOpen,
    Paragraph(&'a str),
}

/// Classify a line. Recognizers run top to bottom and the first match wins.
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(caps) = HEADING_REGEX.captures(line)
        && let (Some(marks), Some(text)) = (caps.get(1), caps.get(2))
    {
        return LineKind::Heading(HeadingLevel::from_marker_len(marks.len()), text.as_str());
    }
    if EMPTY_QUOTE_REGEX.is_match(line) {
        return LineKind::EmptyQuote;
    }
    if DIVIDER_REGEX.is_match(line) {
        return LineKind::Divider;
    }
    if let Some(text) = first_group(&BULLET_REGEX, line) {
        return LineKind::Bullet(text);
    }
    if let Some(text) = first_group(&NUMBERED_REGEX, line) {
        return LineKind::Numbered(text);
    }
    if let Some(text) = first_group(&QUOTE_REGEX, line) {
        return LineKind::Quote(text);
    }
    if line.starts_with("```") {
        return LineKind::FenceOpen;
    }
    LineKind::Paragraph(line)
}

fn first_group<'a>(regex: &Regex, line: &'a str) -> Option<&'a str> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Converts markup text into blocks, chunking every block's text to a
/// maximum character count.
#[derive(Debug, Clone)]
pub struct BlockConverter {
    max_chars: usize,
    code_language: String,
}

impl Default for BlockConverter {
    fn default() -> Self {
        Self::new(crate::chunk::DEFAULT_MAX_CHUNK_CHARS)
    }
}

impl BlockConverter {
    #[must_use]
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
            code_language: DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = language.into();
        self
    }

    /// Convert markup into blocks in document order.
    #[must_use]
    pub fn convert(&self, markup: &str) -> Vec<Block> {
        let lines: Vec<&str> = markup.lines().collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let kind = classify_line(lines[i]);
            i += 1;

            match kind {
                LineKind::Blank | LineKind::EmptyQuote => {}
                LineKind::Divider => blocks.push(Block::Divider),
                LineKind::Heading(level, text) => {
                    self.push_rich(&mut blocks, text, |spans| Block::Heading { level, spans });
                }
                LineKind::Bullet(text) => {
                    self.push_rich(&mut blocks, text, |spans| Block::BulletItem { spans });
                }
                LineKind::Numbered(text) => {
                    self.push_rich(&mut blocks, text, |spans| Block::NumberedItem { spans });
                }
                LineKind::Quote(text) => {
                    self.push_rich(&mut blocks, text, |spans| Block::Quote { spans });
                }
                LineKind::Paragraph(text) => {
                    self.push_rich(&mut blocks, text, |spans| Block::Paragraph { spans });
                }
                LineKind::FenceOpen => {
                    let end = lines[i..]
                        .iter()
                        .position(|line| line.trim_start().starts_with("```"))
                        .map_or(lines.len(), |offset| i + offset);
                    let raw = lines[i..end].join("\n");
                    self.push_code(&mut blocks, &raw);
                    // Skip the closing fence when there is one
                    i = (end + 1).min(lines.len());
                }
            }
        }

        debug!(blocks = blocks.len(), "converted markup to blocks");
        blocks
    }

    fn push_rich(
        &self,
        blocks: &mut Vec<Block>,
        text: &str,
        make: impl Fn(Vec<RichTextSpan>) -> Block,
    ) {
        let spans = parse_inline(text);
        blocks.extend(chunk_spans(&spans, self.max_chars).into_iter().map(make));
    }

    fn push_code(&self, blocks: &mut Vec<Block>, raw: &str) {
        if raw.trim().is_empty() {
            return;
        }
        blocks.extend(
            chunk_text(raw, self.max_chars)
                .into_iter()
                .map(|chunk| Block::Code {
                    language: self.code_language.clone(),
                    text: chunk.to_string(),
                }),
        );
    }
}

/// Convert markup with the default chunk limit and code language.
#[must_use]
pub fn convert_markup(markup: &str) -> Vec<Block> {
    BlockConverter::default().convert(markup)
}
