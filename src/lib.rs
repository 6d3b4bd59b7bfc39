// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Forwarded Email Archiver
//!
//! Turns a forwarded email into a tagged, size-bounded document of typed
//! rich-text blocks, ready for a block-oriented page store.
//!
//! # Features
//!
//! - `#tag` extraction and `Fwd:`/`Re:` prefix cleanup on subjects
//! - Original sender and date recovery across reply/forward threads
//! - Forwarding header removal for Gmail, Outlook and Apple Mail
//! - HTML to markup conversion without images, with URL autolinking
//! - Markup to block conversion with per-block length limits
//!
//! # Example
//!
//! ```rust
//! use email_archive::{ArchiveConfig, Block, IncomingEmail, archive_email};
//!
//! let email = IncomingEmail {
//!     subject: "#acme: Fwd: Q4 Invoice".into(),
//!     text: "See below.\n\n\
//!            ---------- Forwarded message ---------\n\
//!            From: Jane Client <jane@acme.com>\n\
//!            Date: Mon, Dec 9, 2024 at 10:30 AM\n\
//!            Subject: Q4 Invoice\n\n\
//!            Invoice attached."
//!         .into(),
//!     ..IncomingEmail::default()
//! };
//!
//! let archived = archive_email(&email, &ArchiveConfig::default()).unwrap();
//!
//! assert_eq!(archived.subject.tag, "acme");
//! assert_eq!(archived.title, "Q4 Invoice");
//! assert_eq!(archived.sender.unwrap().address, "jane@acme.com");
//! assert_eq!(archived.blocks.len(), 2);
//! assert!(matches!(archived.blocks[0], Block::Paragraph { .. }));
//! ```

mod chunk;
mod config;
mod convert;
mod date;
mod error;
mod forward;
mod headers;
mod inline;
mod markup;
mod parser;
mod strip;
mod subject;
mod types;

pub use chunk::{DEFAULT_MAX_CHUNK_CHARS, chunk_ranges, chunk_spans, chunk_text};
pub use config::{ArchiveConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_TITLE};
pub use convert::{BlockConverter, DEFAULT_CODE_LANGUAGE, LineKind, classify_line, convert_markup};
pub use date::parse_header_date;
pub use error::{ArchiveError, Result};
pub use forward::{HeaderBlock, extract_forward_info, scan_header_blocks};
pub use headers::{HeaderField, Marker};
pub use inline::parse_inline;
pub use markup::{autolink, html_to_markup, normalize_markup};
pub use parser::{ArchivedEmail, IncomingEmail, archive_email};
pub use strip::strip_forward_headers;
pub use subject::{MAX_TAG_LEN, parse_subject, sanitize_tag, strip_forward_prefixes};
pub use types::*;
