//! Language codes used as translation cache keys.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A normalized (trimmed, lower-cased) language tag such as `fr` or `pt-br`.
///
/// This is the cache key of an item's translation map: `"FR"`, `" fr "` and
/// `"fr"` all parse to the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Minimum accepted length.
    pub const MIN_LEN: usize = 2;
    /// Maximum accepted length.
    pub const MAX_LEN: usize = 16;

    /// Parses and normalizes a language tag.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let code = raw.trim().to_ascii_lowercase();

        if code.len() < Self::MIN_LEN || code.len() > Self::MAX_LEN {
            return Err(CatalogError::validation(format!(
                "Invalid language code '{}': expected {}-{} characters",
                raw.trim(),
                Self::MIN_LEN,
                Self::MAX_LEN
            )));
        }

        let well_formed = code.starts_with(|c: char| c.is_ascii_lowercase())
            && !code.ends_with('-')
            && !code.contains("--")
            && code
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if !well_formed {
            return Err(CatalogError::validation(format!(
                "Invalid language code '{}'",
                raw.trim()
            )));
        }

        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// Source language handed to a translator.
///
/// Item text carries no language tag, so the backend always detects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceLanguage {
    /// Let the translation backend detect the source language.
    #[default]
    Auto,
}

impl SourceLanguage {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
        }
    }
}

impl Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
