//! Tenant Slugs

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum slug length, matching a DNS label.
pub const MAX_SLUG_LEN: usize = 63;

/// Reasons a candidate slug was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// Nothing left after trimming.
    #[error("tenant slug is empty")]
    Empty,

    /// Longer than [`MAX_SLUG_LEN`].
    #[error("tenant slug is {len} characters, the maximum is {MAX_SLUG_LEN}")]
    TooLong {
        /// Length of the rejected slug.
        len: usize,
    },

    /// Contains something other than `a-z`, `0-9` or `-`.
    #[error("tenant slug contains invalid character {ch:?}")]
    InvalidCharacter {
        /// First offending character.
        ch: char,
    },

    /// Starts or ends with `-`.
    #[error("tenant slug cannot start or end with '-'")]
    InvalidBoundary,
}

/// URL-safe tenant alias.
///
/// Always lowercase ASCII letters, digits and inner hyphens. Slugs are lookup keys only;
/// authorization decisions use the tenant UUID the slug resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Normalise and validate a raw slug.
    ///
    /// # Errors
    ///
    /// Returns a [`SlugError`] describing the first rule the input breaks.
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        let slug = raw.trim().to_ascii_lowercase();

        if slug.is_empty() {
            return Err(SlugError::Empty);
        }

        if let Some(ch) = slug
            .chars()
            .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-'))
        {
            return Err(SlugError::InvalidCharacter { ch });
        }

        // ASCII only from here, so byte length is character count.
        if slug.len() > MAX_SLUG_LEN {
            return Err(SlugError::TooLong { len: slug.len() });
        }

        if slug.starts_with('-') || slug.ends_with('-') {
            return Err(SlugError::InvalidBoundary);
        }

        Ok(Self(slug))
    }

    /// Borrow the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TenantSlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for TenantSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TenantSlug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TenantSlug> for String {
    fn from(value: TenantSlug) -> Self {
        value.0
    }
}

impl AsRef<str> for TenantSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_accepts_simple_slugs() -> TestResult {
        assert_eq!(TenantSlug::parse("acme")?.as_str(), "acme");
        assert_eq!(TenantSlug::parse("acme-2")?.as_str(), "acme-2");
        assert_eq!(TenantSlug::parse("a")?.as_str(), "a");

        Ok(())
    }

    #[test]
    fn parse_trims_and_lowercases() -> TestResult {
        assert_eq!(TenantSlug::parse("  ACME ")?.as_str(), "acme");

        Ok(())
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(TenantSlug::parse("   "), Err(SlugError::Empty));
    }

    #[test]
    fn parse_rejects_long_input() {
        let raw = "a".repeat(MAX_SLUG_LEN + 1);

        assert_eq!(
            TenantSlug::parse(&raw),
            Err(SlugError::TooLong {
                len: MAX_SLUG_LEN + 1
            })
        );
    }

    #[test]
    fn long_non_ascii_input_reports_the_character() {
        let raw = "\u{e9}".repeat(40);

        assert_eq!(
            TenantSlug::parse(&raw),
            Err(SlugError::InvalidCharacter { ch: '\u{e9}' })
        );
    }

    #[test]
    fn parse_rejects_url_unsafe_characters() {
        assert_eq!(
            TenantSlug::parse("acme/other"),
            Err(SlugError::InvalidCharacter { ch: '/' })
        );
        assert_eq!(
            TenantSlug::parse("acme_co"),
            Err(SlugError::InvalidCharacter { ch: '_' })
        );
    }

    #[test]
    fn parse_rejects_hyphen_boundaries() {
        assert_eq!(TenantSlug::parse("-acme"), Err(SlugError::InvalidBoundary));
        assert_eq!(TenantSlug::parse("acme-"), Err(SlugError::InvalidBoundary));
    }

    #[test]
    fn deserialize_validates() {
        let parsed: Result<TenantSlug, _> = serde_json::from_str("\"Not Valid\"");

        assert!(parsed.is_err(), "spaces are not allowed in slugs");
    }
}
