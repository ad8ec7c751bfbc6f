//! Current-locale state for one page load.
//!
//! The store is created once, initialized once, and then handed by reference
//! to the [`TranslationResolver`](crate::TranslationResolver) and the
//! [`LocaleRouter`](crate::LocaleRouter). Only explicit user action changes it
//! afterwards.

use std::cell::Cell;
use std::fmt;

use crate::locale::Locale;
use crate::storage::{PREFERENCE_KEY, PreferenceStorage};
use crate::sync_catalog;

/// Where the platform-reported language comes from.
pub trait LanguageSource {
    /// Raw language tag, e.g. `en-US`. `None` when the platform reports nothing.
    fn language(&self) -> Option<String>;
}

/// Language source backed by `sys-locale`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemLanguage;

impl LanguageSource for SystemLanguage {
    fn language(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// Language source returning a fixed tag.
#[derive(Debug, Default, Clone)]
pub struct FixedLanguage(pub Option<String>);

impl FixedLanguage {
    pub fn new(tag: &str) -> Self {
        Self(Some(tag.to_string()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl LanguageSource for FixedLanguage {
    fn language(&self) -> Option<String> {
        self.0.clone()
    }
}

pub struct LocaleStore {
    current: Cell<Locale>,
    storage: Box<dyn PreferenceStorage>,
    language: Box<dyn LanguageSource>,
}

impl fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleStore")
            .field("current", &self.current.get())
            .finish_non_exhaustive()
    }
}

impl LocaleStore {
    /// Build an uninitialized store. [`current`](Self::current) reports the
    /// default locale until [`initialize`](Self::initialize) runs.
    pub fn new(
        storage: impl PreferenceStorage + 'static,
        language: impl LanguageSource + 'static,
    ) -> Self {
        Self {
            current: Cell::new(Locale::DEFAULT),
            storage: Box::new(storage),
            language: Box::new(language),
        }
    }

    /// Pick the starting locale: persisted preference, then platform
    /// language, then [`Locale::DEFAULT`].
    pub fn initialize(&self) -> Locale {
        let locale = self
            .persisted()
            .or_else(|| self.platform())
            .unwrap_or(Locale::DEFAULT);
        tracing::debug!("Locale initialized to {}", locale);
        self.current.set(locale);
        sync_catalog(locale);
        locale
    }

    /// Switch to `candidate` and persist it.
    ///
    /// Unsupported tags leave the store untouched and only produce a warning.
    /// Returns the applied locale.
    pub fn set_locale(&self, candidate: &str) -> Option<Locale> {
        let Some(locale) = Locale::from_tag(candidate) else {
            tracing::warn!("Ignoring unsupported locale: {:?}", candidate);
            return None;
        };
        self.current.set(locale);
        sync_catalog(locale);
        if let Err(e) = self.storage.set(PREFERENCE_KEY, locale.as_str()) {
            tracing::warn!("Failed to persist locale {}: {:#}", locale, e);
        }
        Some(locale)
    }

    pub fn current(&self) -> Locale {
        self.current.get()
    }

    fn persisted(&self) -> Option<Locale> {
        let stored = self.storage.get(PREFERENCE_KEY)?;
        let locale = Locale::from_tag(&stored);
        if locale.is_none() {
            tracing::warn!("Ignoring persisted locale {:?}", stored);
        }
        locale
    }

    fn platform(&self) -> Option<Locale> {
        let reported = self.language.language()?;
        let locale = Locale::from_language_tag(&reported);
        if locale.is_none() {
            tracing::debug!("Platform language {:?} is not supported", reported);
        }
        locale
    }
}
