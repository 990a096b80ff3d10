//! Locale identifiers and the supported-language priority list

use crate::error::{LocalizationError, LocalizationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Languages bundle loading iterates over when no locale is given, in
/// priority order. English first, then the rest of the supported range.
pub const SUPPORTED_LANGUAGES: [&str; 28] = [
    "en", "fr", "de", "it", "es", "ja", "af", "ar", "bg", "cs", "da", "el", "et", "fi", "hi",
    "hu", "iw", "ko", "nl", "no", "pl", "pt", "ro", "ru", "sq", "th", "tr", "zh",
];

/// A language (optionally region-qualified) identifier.
///
/// Two locales may differ by region and still share a bundle partition:
/// only the language subtag participates in partitioning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale {
    id: LanguageIdentifier,
}

impl Locale {
    /// Parse a locale from a BCP 47 tag such as `fr` or `de-AT`
    pub fn parse(tag: &str) -> LocalizationResult<Self> {
        tag.parse::<LanguageIdentifier>()
            .map(|id| Self { id })
            .map_err(|_| LocalizationError::InvalidLocale(tag.to_string()))
    }

    /// Language subtag, the part that selects a bundle partition
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Region subtag, if any
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|region| region.as_str())
    }

    /// Full BCP 47 tag
    pub fn tag(&self) -> String {
        self.id.to_string()
    }

    /// Whether both locales select the same bundle partition
    pub fn same_language(&self, other: &Locale) -> bool {
        self.id.language == other.id.language
    }

    /// The locale reported by the operating system, or English when the
    /// platform does not say.
    pub fn platform() -> Self {
        sys_locale::get_locale()
            .and_then(|tag| Self::parse(&tag).ok())
            .unwrap_or_else(Self::english)
    }

    /// Process-independent default
    pub fn english() -> Self {
        Self {
            id: LanguageIdentifier::from_str("en").expect("'en' is a valid language tag"),
        }
    }

    pub(crate) fn as_language_identifier(&self) -> &LanguageIdentifier {
        &self.id
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for Locale {
    type Err = LocalizationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::parse(tag)
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(id: LanguageIdentifier) -> Self {
        Self { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_and_region() {
        let locale = Locale::parse("fr-FR").unwrap();
        assert_eq!(locale.language(), "fr");
        assert_eq!(locale.region(), Some("FR"));
        assert_eq!(locale.tag(), "fr-FR");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Locale::parse("not a locale!").is_err());
    }

    #[test]
    fn region_does_not_change_the_partition() {
        let fr = Locale::parse("fr").unwrap();
        let fr_ca = Locale::parse("fr-CA").unwrap();
        assert!(fr.same_language(&fr_ca));
        assert_ne!(fr, fr_ca);
    }

    #[test]
    fn priority_list_is_english_first() {
        assert_eq!(SUPPORTED_LANGUAGES[0], "en");
        assert_eq!(SUPPORTED_LANGUAGES.len(), 28);
        for tag in SUPPORTED_LANGUAGES {
            assert!(Locale::parse(tag).is_ok(), "unparseable tag {tag}");
        }
    }
}
