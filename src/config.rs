//! Archiving configuration

use crate::chunk::DEFAULT_MAX_CHUNK_CHARS;
use crate::convert::{BlockConverter, DEFAULT_CODE_LANGUAGE};
use crate::error::{ArchiveError, Result};
use crate::types::SelfAddresses;
use serde::{Deserialize, Serialize};

/// Default bound on each body part, in bytes
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Title used when a subject has no text left after cleaning
pub const DEFAULT_TITLE: &str = "(no subject)";

/// Settings for [`crate::archive_email`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Maximum characters per block chunk
    pub max_span_chars: usize,

    /// Maximum size of the plain and the HTML body, each
    pub max_body_bytes: usize,

    /// Addresses of the archiving user
    pub self_addresses: Vec<String>,

    /// Title substituted for an empty subject
    pub default_title: String,

    /// Language tag for code blocks
    pub code_language: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            max_span_chars: DEFAULT_MAX_CHUNK_CHARS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            self_addresses: Vec::new(),
            default_title: DEFAULT_TITLE.to_string(),
            code_language: DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }
}

impl ArchiveConfig {
    /// Load a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| ArchiveError::Config(e.to_string()))?;

        if config.max_span_chars == 0 {
            return Err(ArchiveError::Config("max_span_chars must be positive".into()));
        }
        config.self_addresses = config
            .self_addresses
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();

        Ok(config)
    }

    #[must_use]
    pub fn with_self_addresses<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.self_addresses = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    #[must_use]
    pub fn self_address_set(&self) -> SelfAddresses {
        SelfAddresses::new(&self.self_addresses)
    }

    #[must_use]
    pub fn block_converter(&self) -> BlockConverter {
        BlockConverter::new(self.max_span_chars).with_code_language(self.code_language.clone())
    }
}
