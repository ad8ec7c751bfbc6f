use rust_i18n::Backend;

rust_i18n::i18n!("../../locales");

pub mod locale;
pub mod resolver;
pub mod router;
pub mod storage;
pub mod store;

pub use locale::{FALLBACK_CHAIN, Locale, LocaleError};
pub use resolver::{LocalizedField, TranslationResolver, resolve_field, resolve_record};
pub use router::{INDEX_DOCUMENT, LocaleRouter, Navigator, localized_url};
pub use storage::{FileStorage, MemoryStorage, PREFERENCE_KEY, PreferenceStorage};
pub use store::{FixedLanguage, LanguageSource, LocaleStore, SystemLanguage};

/// Message catalog backend shared by every crate that calls [`init!`].
///
/// A key is looked up for the requested locale first, then along
/// [`FALLBACK_CHAIN`].
pub struct I18nBackend;

impl Backend for I18nBackend {
    fn available_locales(&self) -> Vec<&str> {
        _RUST_I18N_BACKEND.available_locales()
    }

    fn translate(&self, locale: &str, key: &str) -> Option<&str> {
        std::iter::once(locale)
            .chain(FALLBACK_CHAIN.iter().map(|fallback| fallback.as_str()))
            .find_map(|candidate| _RUST_I18N_BACKEND.translate(candidate, key))
    }
}

/// Keeps the catalog's active locale in step with a [`LocaleStore`].
pub(crate) fn sync_catalog(locale: Locale) {
    rust_i18n::set_locale(locale.as_str());
}

#[macro_export]
macro_rules! init {
    () => {
        vitrine_i18n::rust_i18n::i18n!(backend = vitrine_i18n::I18nBackend);
    };
}

pub use rust_i18n::set_locale;
pub use rust_i18n::t;
pub use rust_i18n;
