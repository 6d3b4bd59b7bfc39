//! Forwarded email to block document pipeline

use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, Result};
use crate::forward::extract_forward_info;
use crate::markup::normalize_markup;
use crate::strip::strip_forward_headers;
use crate::subject::parse_subject;
use crate::types::{Block, EmailAddress, ForwardInfo, ParsedSubject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An email as handed over by the ingestion layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingEmail {
    /// Raw subject line
    pub subject: String,

    /// Plain text body
    pub text: String,

    /// HTML body, if the message had one
    pub html: Option<String>,

    /// Transport-level sender (the forwarding user)
    pub from: Option<EmailAddress>,

    /// Transport-level date
    pub date: Option<DateTime<Utc>>,
}

impl IncomingEmail {
    /// Decode a raw RFC 5322 message.
    ///
    /// Takes the Subject, From and Date headers and the first `text/plain`
    /// and `text/html` parts found in the MIME tree.
    pub fn from_mime(raw: &[u8]) -> Result<Self> {
        let parsed =
            mailparse::parse_mail(raw).map_err(|e| ArchiveError::Structure(e.to_string()))?;

        let header = |name: &str| {
            parsed
                .headers
                .iter()
                .find(|h| h.get_key().eq_ignore_ascii_case(name))
                .map(mailparse::MailHeader::get_value)
        };

        let subject = header("subject").unwrap_or_default();
        let from = header("from").and_then(|v| EmailAddress::parse(&v));
        let date = header("date")
            .and_then(|v| DateTime::parse_from_rfc2822(v.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let (text, html) = extract_body_parts(&parsed);

        Ok(Self {
            subject,
            text,
            html,
            from,
            date,
        })
    }
}

/// The structured result of archiving one email
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchivedEmail {
    pub subject: ParsedSubject,

    /// Page title: the clean subject, or the configured default
    pub title: String,

    /// What the body revealed about the original message
    pub forward: ForwardInfo,

    /// Original sender, falling back to the transport sender
    pub sender: Option<EmailAddress>,

    /// Original date, falling back to the transport date
    pub date: Option<DateTime<Utc>>,

    pub blocks: Vec<Block>,
}

/// Run the whole transform over one email.
pub fn archive_email(email: &IncomingEmail, config: &ArchiveConfig) -> Result<ArchivedEmail> {
    check_size("text", email.text.len(), config.max_body_bytes)?;
    if let Some(html) = &email.html {
        check_size("html", html.len(), config.max_body_bytes)?;
    }

    let subject = parse_subject(&email.subject);
    let title = if subject.clean_subject.is_empty() {
        config.default_title.clone()
    } else {
        subject.clean_subject.clone()
    };

    let stripped_text = strip_forward_headers(&email.text);
    let markup = strip_forward_headers(&normalize_markup(email.html.as_deref(), &stripped_text));

    // Headers are read from the raw body; HTML-only mail falls back to the
    // unstripped markup.
    let self_addresses = config.self_address_set();
    let forward = if email.text.trim().is_empty() {
        let raw_markup = normalize_markup(email.html.as_deref(), &email.text);
        extract_forward_info(&raw_markup, &self_addresses)
    } else {
        extract_forward_info(&email.text, &self_addresses)
    };

    let blocks = config.block_converter().convert(&markup);

    let sender = forward
        .original_sender
        .clone()
        .or_else(|| email.from.clone());
    let date = forward.original_date.or(email.date);

    debug!(
        tag = %subject.tag,
        %title,
        sender = sender.as_ref().map(|s| s.address.as_str()),
        forwarded_sender = forward.original_sender.is_some(),
        blocks = blocks.len(),
        "archived email"
    );

    Ok(ArchivedEmail {
        subject,
        title,
        forward,
        sender,
        date,
        blocks,
    })
}

fn check_size(field: &'static str, actual: usize, limit: usize) -> Result<()> {
    if actual > limit {
        return Err(ArchiveError::InputTooLarge {
            field,
            limit,
            actual,
        });
    }
    Ok(())
}

fn extract_body_parts(parsed: &mailparse::ParsedMail) -> (String, Option<String>) {
    let mut text = String::new();
    let mut html: Option<String> = None;

    if parsed.subparts.is_empty() {
        let content_type = parsed.ctype.mimetype.to_lowercase();
        if let Ok(body) = parsed.get_body() {
            if content_type.contains("text/html") {
                html = Some(body);
            } else {
                text = body;
            }
        }
    } else {
        extract_body_recursive(parsed, &mut text, &mut html);
    }

    (text, html)
}

fn extract_body_recursive(
    parsed: &mailparse::ParsedMail,
    text: &mut String,
    html: &mut Option<String>,
) {
    for part in &parsed.subparts {
        let content_type = part.ctype.mimetype.to_lowercase();

        if part.subparts.is_empty() {
            if matches!(
                part.get_content_disposition().disposition,
                mailparse::DispositionType::Attachment
            ) {
                continue;
            }
            if let Ok(body) = part.get_body() {
                if content_type.contains("text/plain") && text.is_empty() {
                    *text = body;
                } else if content_type.contains("text/html") && html.is_none() {
                    *html = Some(body);
                }
            }
        } else {
            extract_body_recursive(part, text, html);
        }
    }
}
