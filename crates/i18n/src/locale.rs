//! The closed set of locales the storefront is published in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locales consulted, in order, once the current locale has no entry.
pub const FALLBACK_CHAIN: [Locale; 2] = [Locale::Fr, Locale::En];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("unsupported locale `{0}`")]
    Unsupported(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Fr, Locale::En];
    pub const DEFAULT: Locale = Locale::Fr;

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    /// Exact match against a supported tag (`"fr"`, `"en"`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == tag)
    }

    /// Reduce a platform language tag to its primary subtag and match it.
    ///
    /// Accepts the shapes browsers and operating systems report:
    /// `en-US`, `en_US.UTF-8`, `fr@euro`, `EN`, `fr-CA,fr;q=0.9`.
    ///
    /// ```rust
    /// use vitrine_i18n::Locale;
    ///
    /// assert_eq!(Locale::from_language_tag("en_US.UTF-8"), Some(Locale::En));
    /// assert_eq!(Locale::from_language_tag("de-DE"), None);
    /// ```
    pub fn from_language_tag(raw: &str) -> Option<Self> {
        let primary = raw
            .trim()
            .split(['-', '_', '.', '@', ',', ';'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::from_tag(&primary)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}
