//! Picks the display string for a localizable field of a content record.
//!
//! Records come straight from backend JSON. A field is either a plain string
//! or an object keyed by locale tag:
//!
//! ```json
//! { "sku": "A-12", "name": { "fr": "Gants", "en": "Gloves" } }
//! ```
//!
//! Resolution never fails. Broken data resolves to a bracketed placeholder so
//! the page keeps rendering.

use indexmap::IndexMap;
use serde_json::Value;

use crate::locale::{FALLBACK_CHAIN, Locale};
use crate::store::LocaleStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizedField {
    PlainText(String),
    /// Locale tag to text, in document order. Keys may be tags outside the
    /// supported set.
    LocalizedMap(IndexMap<String, String>),
    Unsupported,
}

impl From<&Value> for LocalizedField {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(text) => LocalizedField::PlainText(text.clone()),
            Value::Object(entries) => LocalizedField::LocalizedMap(
                entries
                    .iter()
                    .filter_map(|(tag, text)| Some((tag.clone(), text.as_str()?.to_string())))
                    .collect(),
            ),
            _ => LocalizedField::Unsupported,
        }
    }
}

fn missing(field: &str) -> String {
    format!("[missing: {field}]")
}

/// Resolve an already classified field for `locale`.
pub fn resolve_field(value: &LocalizedField, field: &str, locale: Locale) -> String {
    match value {
        LocalizedField::PlainText(text) => text.clone(),
        LocalizedField::LocalizedMap(entries) => std::iter::once(locale)
            .chain(FALLBACK_CHAIN)
            .find_map(|candidate| entries.get(candidate.as_str()))
            .or_else(|| entries.values().next())
            .cloned()
            .unwrap_or_else(|| {
                tracing::debug!("Field {} has no translations", field);
                format!("[{field}: no translation for {locale}]")
            }),
        LocalizedField::Unsupported => {
            tracing::debug!("Field {} holds a non-translatable value", field);
            format!("[{field}: not translatable]")
        }
    }
}

/// Resolve `record[field]` for `locale`.
///
/// A JSON `null` counts as an absent field.
pub fn resolve_record(record: Option<&Value>, field: &str, locale: Locale) -> String {
    let Some(entries) = record.and_then(Value::as_object) else {
        tracing::warn!("Cannot resolve {} on a non-object record", field);
        return missing(field);
    };
    match entries.get(field) {
        None | Some(Value::Null) => missing(field),
        Some(value) => resolve_field(&LocalizedField::from(value), field, locale),
    }
}

/// Resolver bound to the page's [`LocaleStore`].
#[derive(Debug, Clone, Copy)]
pub struct TranslationResolver<'a> {
    store: &'a LocaleStore,
}

impl<'a> TranslationResolver<'a> {
    pub fn new(store: &'a LocaleStore) -> Self {
        Self { store }
    }

    pub fn resolve(&self, record: Option<&Value>, field: &str) -> String {
        resolve_record(record, field, self.store.current())
    }
}
