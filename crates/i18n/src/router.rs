//! Language switching by path prefix.
//!
//! Pages live under a locale segment: `/fr/produits.html`, `/en/produits.html`.
//! Switching language swaps that segment and reloads the page.

use std::fmt;
use url::{ParseError, Url};

use crate::locale::Locale;
use crate::store::LocaleStore;

/// Landing document of a locale root.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Base used to parse site-relative paths such as `/fr/panier.html`.
const RELATIVE_BASE: &str = "http://relative.invalid/";

pub trait Navigator {
    fn current_url(&self) -> String;
    /// Load `url`, replacing the current page.
    fn navigate(&self, url: &str);
}

fn is_locale_segment(segment: &str) -> bool {
    Locale::ALL.iter().any(|locale| locale.as_str() == segment)
}

/// Rewrite `current` so it points at the same page under `target`.
///
/// Absolute URLs stay absolute and site-relative paths stay relative. The
/// query string is kept, the fragment is dropped.
///
/// ```rust
/// use vitrine_i18n::{Locale, localized_url};
///
/// assert_eq!(
///     localized_url("https://shop.example/fr/produits.html?id=3", Locale::En),
///     "https://shop.example/en/produits.html?id=3"
/// );
/// assert_eq!(localized_url("/fr/", Locale::En), "/en/index.html");
/// ```
pub fn localized_url(current: &str, target: Locale) -> String {
    match Url::parse(current) {
        Ok(url) if url.cannot_be_a_base() => {
            degraded_url(current, target, "URL has no hierarchical path")
        }
        Ok(url) => rewrite(url, target).to_string(),
        Err(ParseError::RelativeUrlWithoutBase) => {
            // `//segment` would otherwise be read as a protocol-relative host
            let site_path = format!("/{}", current.trim_start_matches('/'));
            match Url::parse(RELATIVE_BASE).and_then(|base| base.join(&site_path)) {
                Ok(url) => {
                    let url = rewrite(url, target);
                    match url.query() {
                        Some(query) => format!("{}?{}", url.path(), query),
                        None => url.path().to_string(),
                    }
                }
                Err(e) => degraded_url(current, target, e),
            }
        }
        Err(e) => degraded_url(current, target, e),
    }
}

fn rewrite(mut url: Url, target: Locale) -> Url {
    let segments: Vec<String> = url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let rest = match segments.split_first() {
        Some((first, rest)) if is_locale_segment(first) => rest,
        _ => &segments[..],
    };
    let path = if rest.is_empty() {
        format!("/{}/{}", target, INDEX_DOCUMENT)
    } else {
        format!("/{}/{}", target, rest.join("/"))
    };
    url.set_path(&path);
    url.set_fragment(None);
    url
}

/// Rebuild a locale path from the page filename alone when `raw` has no
/// usable path structure.
fn degraded_url(raw: &str, target: Locale, reason: impl fmt::Display) -> String {
    tracing::warn!("Cannot parse {:?} ({}), rebuilding from filename", raw, reason);
    let raw = raw.split('#').next().unwrap_or_default();
    let (path, query) = match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    };
    let file = path.rsplit('/').next().unwrap_or_default();
    let file = if file.is_empty() || is_locale_segment(file) {
        INDEX_DOCUMENT
    } else {
        file
    };
    match query {
        Some(query) => format!("/{}/{}?{}", target, file, query),
        None => format!("/{}/{}", target, file),
    }
}

/// Language selector backend: persist the choice, then reload under the new
/// locale prefix.
#[derive(Debug)]
pub struct LocaleRouter<'a, N> {
    store: &'a LocaleStore,
    navigator: N,
}

impl<'a, N: Navigator> LocaleRouter<'a, N> {
    pub fn new(store: &'a LocaleStore, navigator: N) -> Self {
        Self { store, navigator }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Unsupported targets are ignored and no navigation happens.
    pub fn switch_locale_and_reload(&self, target: &str) {
        let Some(locale) = self.store.set_locale(target) else {
            return;
        };
        let destination = localized_url(&self.navigator.current_url(), locale);
        tracing::info!("Switching to {}: {}", locale, destination);
        self.navigator.navigate(&destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, PREFERENCE_KEY, PreferenceStorage};
    use crate::store::FixedLanguage;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingNavigator {
        current: String,
        visited: RefCell<Vec<String>>,
    }

    impl RecordingNavigator {
        fn at(url: &str) -> Self {
            Self {
                current: url.to_string(),
                visited: RefCell::new(Vec::new()),
            }
        }
    }

    impl Navigator for RecordingNavigator {
        fn current_url(&self) -> String {
            self.current.clone()
        }

        fn navigate(&self, url: &str) {
            self.visited.borrow_mut().push(url.to_string());
        }
    }

    #[derive(Clone, Default)]
    struct SharedStorage(Rc<MemoryStorage>);

    impl PreferenceStorage for SharedStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.0.set(key, value)
        }
    }

    #[test]
    fn test_replaces_locale_prefix_and_keeps_query() {
        assert_eq!(
            localized_url("https://shop.example/fr/produits.html?id=3", Locale::En),
            "https://shop.example/en/produits.html?id=3"
        );
        assert_eq!(
            localized_url("/fr/produits.html?id=3", Locale::En),
            "/en/produits.html?id=3"
        );
    }

    #[test]
    fn test_locale_root_becomes_index() {
        for current in ["https://shop.example/fr/", "https://shop.example/fr"] {
            assert_eq!(
                localized_url(current, Locale::En),
                "https://shop.example/en/index.html"
            );
        }
        assert_eq!(localized_url("/fr/", Locale::En), "/en/index.html");
        assert_eq!(localized_url("/fr", Locale::En), "/en/index.html");
        assert_eq!(
            localized_url("https://shop.example/", Locale::Fr),
            "https://shop.example/fr/index.html"
        );
    }

    #[test]
    fn test_prefixes_unlocalized_paths() {
        assert_eq!(
            localized_url("https://shop.example/b2b/commandes.html", Locale::En),
            "https://shop.example/en/b2b/commandes.html"
        );
    }

    #[test]
    fn test_nested_path_and_trailing_slash() {
        assert_eq!(
            localized_url("https://shop.example/en/b2b/catalogue/?page=2", Locale::Fr),
            "https://shop.example/fr/b2b/catalogue?page=2"
        );
    }

    #[test]
    fn test_leading_double_slash_stays_a_path() {
        assert_eq!(localized_url("//b2b/fr/x.html", Locale::En), "/en/b2b/fr/x.html");
        assert_eq!(localized_url("//fr//commandes.html?p=1", Locale::En), "/en/commandes.html?p=1");
        assert_eq!(
            localized_url("https://shop.example//b2b/fr/x.html", Locale::En),
            "https://shop.example/en/b2b/fr/x.html"
        );
    }

    #[test]
    fn test_only_first_segment_is_a_prefix() {
        assert_eq!(
            localized_url("https://shop.example/aide/fr/faq.html", Locale::En),
            "https://shop.example/en/aide/fr/faq.html"
        );
    }

    #[test]
    fn test_fragment_dropped() {
        assert_eq!(
            localized_url("https://shop.example/fr/compte.html?tab=points#parrainage", Locale::En),
            "https://shop.example/en/compte.html?tab=points"
        );
    }

    #[test]
    fn test_unparsable_url_uses_filename() {
        assert_eq!(
            localized_url("https://shop example/fr/panier.html?step=2", Locale::En),
            "/en/panier.html?step=2"
        );
        assert_eq!(localized_url("http://[oops/fr", Locale::En), "/en/index.html");
        assert_eq!(localized_url("http://[oops/", Locale::Fr), "/fr/index.html");
        // parses, but as scheme `localhost` with an opaque path
        assert_eq!(localized_url("localhost:8080/fr/x.html", Locale::En), "/en/x.html");
        assert_eq!(
            localized_url("localhost:8080/fr/?ref=mail", Locale::En),
            "/en/index.html?ref=mail"
        );
    }

    #[test]
    fn test_switch_persists_and_navigates() {
        let storage = SharedStorage::default();
        let store = LocaleStore::new(storage.clone(), FixedLanguage::new("fr"));
        store.initialize();
        let router = LocaleRouter::new(
            &store,
            RecordingNavigator::at("https://shop.example/fr/produits.html?id=3"),
        );

        router.switch_locale_and_reload("en");

        assert_eq!(store.current(), Locale::En);
        assert_eq!(storage.get(PREFERENCE_KEY).as_deref(), Some("en"));
        assert_eq!(
            *router.navigator().visited.borrow(),
            vec!["https://shop.example/en/produits.html?id=3".to_string()]
        );
    }

    #[test]
    fn test_switch_to_unsupported_does_nothing() {
        let store = LocaleStore::new(MemoryStorage::new(), FixedLanguage::new("fr"));
        store.initialize();
        let router = LocaleRouter::new(&store, RecordingNavigator::at("https://shop.example/fr/"));

        router.switch_locale_and_reload("de");

        assert_eq!(store.current(), Locale::Fr);
        assert!(router.navigator().visited.borrow().is_empty());
    }
}
