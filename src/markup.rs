//! Conversion of email bodies to lightweight markup

use htmd::HtmlToMarkdown;
use htmd::options::{BulletListMarker, CodeBlockStyle, HeadingStyle, Options};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Elements dropped with their whole subtree during HTML conversion
const SKIPPED_TAGS: &[&str] = &["img", "picture", "svg", "script", "style", "head", "title"];

static IMAGE_SYNTAX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[[^\]]*\]\((?:[^\s()]|\([^\s()]*\))*(?:\s+[^)]*)?\)").unwrap()
});

// Left behind by anchors wrapping an image
static EMPTY_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*\]\((?:[^\s()]|\([^\s()]*\))*(?:\s+[^)]*)?\)").unwrap()
});

// Inline code and existing links are matched first so URLs inside them are
// left alone.
static AUTOLINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<keep>`[^`]*`|\[[^\]]*\]\((?:[^\s()]|\([^\s()]*\))*\))|<(?P<angle>https?://[^>\s]+)>|(?P<url>https?://(?:[^\s<>\[\]()"']|\([^\s<>()]*\))+)"#,
    )
    .unwrap()
});

/// Turn an email body into markup text for the block converter.
///
/// HTML is converted when present and non-blank, with every image element
/// dropped along with any link left without text by doing so. Otherwise the plain text is used as-is. Bare URLs are then
/// rewritten as `[url](url)` links in both cases.
#[must_use]
pub fn normalize_markup(html: Option<&str>, plain_text: &str) -> String {
    let markup = match html.filter(|h| !h.trim().is_empty()) {
        Some(html) => html_to_markup(html).unwrap_or_else(|| plain_text.to_string()),
        None => plain_text.to_string(),
    };

    autolink(&markup)
}

/// Convert HTML to markup, or `None` if the converter gives up.
#[must_use]
pub fn html_to_markup(html: &str) -> Option<String> {
    let converter = HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            bullet_list_marker: BulletListMarker::Dash,
            ..Options::default()
        })
        .skip_tags(SKIPPED_TAGS.to_vec())
        .build();

    match converter.convert(html) {
        Ok(markdown) => {
            let markdown = IMAGE_SYNTAX_REGEX.replace_all(&markdown, "");
            let markdown = EMPTY_LINK_REGEX.replace_all(&markdown, "").into_owned();
            debug!(html_len = html.len(), markup_len = markdown.len(), "converted HTML body");
            Some(markdown)
        }
        Err(e) => {
            warn!("HTML conversion failed, using plain text body: {e}");
            None
        }
    }
}

/// Rewrite bare `http(s)://` URLs that are not already links as `[url](url)`.
///
/// Fenced code blocks and inline code are left untouched.
#[must_use]
pub fn autolink(text: &str) -> String {
    let mut in_fence = false;
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            lines.push(line.to_string());
        } else if in_fence {
            lines.push(line.to_string());
        } else {
            lines.push(autolink_line(line));
        }
    }

    lines.join("\n")
}

fn autolink_line(line: &str) -> String {
    AUTOLINK_REGEX
        .replace_all(line, |caps: &Captures<'_>| {
            if let Some(keep) = caps.name("keep") {
                return keep.as_str().to_string();
            }
            if let Some(url) = caps.name("angle") {
                return link_to(url.as_str());
            }

            let url = caps.name("url").map_or("", |m| m.as_str());
            // Sentence punctuation after a URL is not part of it
            let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?']);
            format!("{}{}", link_to(trimmed), &url[trimmed.len()..])
        })
        .into_owned()
}

fn link_to(url: &str) -> String {
    format!("[{url}]({url})")
}
