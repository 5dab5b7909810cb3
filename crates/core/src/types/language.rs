//! Storefront languages.

use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// A language the storefront publishes catalog text in.
///
/// [`Language::Fr`] is the default interface language and
/// [`Language::FALLBACK`] is used when a product lacks the requested
/// translation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    De,
    Pt,
}

impl Language {
    /// Language used when a translation is missing.
    pub const FALLBACK: Self = Self::En;

    /// The ISO 639-1 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::De => "de",
            Self::Pt => "pt",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = ParseEnumError;

    /// Parses a language code, case-insensitive and tolerant of region tags
    /// (`pt-BR`, `en_GB`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let primary = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        match primary {
            "fr" => Ok(Self::Fr),
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            "pt" => Ok(Self::Pt),
            _ => Err(ParseEnumError::new("language", s)),
        }
    }
}
