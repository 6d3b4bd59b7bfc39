//! Core types for archived emails

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap()
});

/// Email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Display name (e.g., "John Doe")
    pub name: Option<String>,

    /// Email address (e.g., "john@example.com")
    pub address: String,

    /// Domain extracted from address
    pub domain: String,

    /// Local part (before @)
    pub local_part: String,
}

impl EmailAddress {
    /// Parse an address out of a header value.
    ///
    /// Accepts `Name <addr>`, `"Name" <mailto:addr>`, `addr<mailto:addr>` and
    /// bare `addr` forms. Returns `None` when no address can be found.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        // "Name <email@domain.com>" format
        if let Some(start) = s.find('<')
            && let Some(len) = s[start..].find('>')
        {
            let inner = s[start + 1..start + len].trim();
            let inner = inner.strip_prefix("mailto:").unwrap_or(inner);
            if let Some(found) = ADDRESS_REGEX.find(inner) {
                return Some(Self::build(&s[..start], found.as_str()));
            }
        }

        // Bare address somewhere in the value
        let found = ADDRESS_REGEX.find(s)?;
        Some(Self::build(&s[..found.start()], found.as_str()))
    }

    fn build(name_part: &str, address: &str) -> Self {
        let name = name_part
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '*' || c.is_whitespace())
            .to_string();
        let (local, domain) = address.split_once('@').unwrap_or((address, ""));

        Self {
            name: if name.is_empty() || name.eq_ignore_ascii_case(address) {
                None
            } else {
                Some(name)
            },
            local_part: local.to_string(),
            domain: domain.to_string(),
            address: address.to_string(),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// Addresses belonging to the archiving user, compared case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfAddresses(HashSet<String>);

impl SelfAddresses {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            addresses
                .into_iter()
                .map(|a| a.as_ref().trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
        )
    }

    #[must_use]
    pub fn contains(&self, address: &EmailAddress) -> bool {
        self.0.contains(&address.address.to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelfAddresses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Tag used when a subject carries no usable `#tag`
pub const MISSING_TAG: &str = "missing";

/// Subject line split into its routing tag and display text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedSubject {
    /// Lowercase `[a-z0-9]{1,50}` tag, or [`MISSING_TAG`]
    pub tag: String,

    /// Subject without tag and forwarding prefixes
    pub clean_subject: String,
}

impl ParsedSubject {
    /// Whether the subject carried a usable tag
    #[must_use]
    pub fn has_tag(&self) -> bool {
        self.tag != MISSING_TAG
    }
}

/// Sender and date of the externally authored message in a forwarded thread
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForwardInfo {
    pub original_sender: Option<EmailAddress>,
    pub original_date: Option<DateTime<Utc>>,
}

impl ForwardInfo {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.original_sender.is_none() && self.original_date.is_none()
    }
}

/// Inline formatting flags of a span
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Annotations {
    pub const PLAIN: Self = Self {
        bold: false,
        italic: false,
        strikethrough: false,
        code: false,
    };

    pub const BOLD: Self = Self {
        bold: true,
        ..Self::PLAIN
    };

    pub const ITALIC: Self = Self {
        italic: true,
        ..Self::PLAIN
    };

    pub const STRIKETHROUGH: Self = Self {
        strikethrough: true,
        ..Self::PLAIN
    };

    pub const CODE: Self = Self {
        code: true,
        ..Self::PLAIN
    };

    #[must_use]
    pub const fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.strikethrough || self.code)
    }
}

/// A run of text sharing one annotation set and link target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichTextSpan {
    pub content: String,

    #[serde(default, skip_serializing_if = "Annotations::is_plain")]
    pub annotations: Annotations,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl RichTextSpan {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            annotations: Annotations::PLAIN,
            link: None,
        }
    }

    pub fn annotated(content: impl Into<String>, annotations: Annotations) -> Self {
        Self {
            content: content.into(),
            annotations,
            link: None,
        }
    }

    pub fn linked(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            annotations: Annotations::PLAIN,
            link: Some(url.into()),
        }
    }
}

/// Heading depth supported by the page store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for a run of `#` markers; deeper levels clamp to `H3`
    #[must_use]
    pub const fn from_marker_len(len: usize) -> Self {
        match len {
            0 | 1 => Self::H1,
            2 => Self::H2,
            _ => Self::H3,
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

/// A typed content block, in document order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        spans: Vec<RichTextSpan>,
    },
    Heading {
        level: HeadingLevel,
        spans: Vec<RichTextSpan>,
    },
    BulletItem {
        spans: Vec<RichTextSpan>,
    },
    NumberedItem {
        spans: Vec<RichTextSpan>,
    },
    Quote {
        spans: Vec<RichTextSpan>,
    },
    /// Verbatim text, never inline-parsed
    Code {
        language: String,
        text: String,
    },
    Divider,
}

impl Block {
    /// Spans of a rich-text block; empty for `Code` and `Divider`
    #[must_use]
    pub fn spans(&self) -> &[RichTextSpan] {
        match self {
            Self::Paragraph { spans }
            | Self::Heading { spans, .. }
            | Self::BulletItem { spans }
            | Self::NumberedItem { spans }
            | Self::Quote { spans } => spans,
            Self::Code { .. } | Self::Divider => &[],
        }
    }

    /// Concatenated text content of the block
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Code { text, .. } => text.clone(),
            other => other.spans().iter().map(|s| s.content.as_str()).collect(),
        }
    }
}
