//! Locale identifiers as used by the Hygraph `Locale` enum.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Locale`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The input string is empty.
    #[error("locale cannot be empty")]
    Empty,
    /// The language part is not 2-3 lowercase ASCII letters.
    #[error("invalid language code in locale '{0}'")]
    InvalidLanguage(String),
    /// The region part is not 2-4 ASCII alphanumerics.
    #[error("invalid region in locale '{0}'")]
    InvalidRegion(String),
}

/// A content locale (e.g. `en`, `de`, `en_US`).
///
/// Hygraph exposes locales as GraphQL enum values, so they are restricted to
/// identifier-safe characters: a 2-3 letter lowercase language code,
/// optionally followed by `_` and a 2-4 character region.
///
/// ## Examples
///
/// ```
/// use hygraph_storefront_core::Locale;
///
/// assert!(Locale::parse("en").is_ok());
/// assert!(Locale::parse("de_AT").is_ok());
///
/// assert!(Locale::parse("").is_err());
/// assert!(Locale::parse("EN").is_err());
/// assert!(Locale::parse("en-US").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Fallback locale requested alongside every localized query.
    pub const FALLBACK: &'static str = "en";

    /// Parse a `Locale` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not of the form
    /// `language` or `language_REGION`.
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        if s.is_empty() {
            return Err(LocaleError::Empty);
        }

        let (language, region) = match s.split_once('_') {
            Some((language, region)) => (language, Some(region)),
            None => (s, None),
        };

        if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_lowercase())
        {
            return Err(LocaleError::InvalidLanguage(s.to_owned()));
        }

        if let Some(region) = region
            && (!(2..=4).contains(&region.len())
                || !region.bytes().all(|b| b.is_ascii_alphanumeric()))
        {
            return Err(LocaleError::InvalidRegion(s.to_owned()));
        }

        Ok(Self(s.to_owned()))
    }

    /// The fallback locale (`en`).
    #[must_use]
    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_owned())
    }

    /// Whether this is the fallback locale.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.0 == Self::FALLBACK
    }

    /// Returns the locale as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
