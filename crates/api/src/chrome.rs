//! Shared header and footer fragments injected into every page.

use crate::macros::{define_api_struct, use_common_crate};
use regex::{NoExpand, Regex};
use std::sync::LazyLock;
use vitrine_i18n::Locale;

use_common_crate!();
define_api_struct!(ChromeApi);

static HEADER_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div\s+id\s*=\s*"site-header"\s*>\s*</div>"#).expect("valid header slot pattern")
});
static FOOTER_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div\s+id\s*=\s*"site-footer"\s*>\s*</div>"#).expect("valid footer slot pattern")
});

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteChrome {
    pub header: String,
    pub footer: String,
}

pub(crate) fn partial_path(locale: Locale, name: &str) -> String {
    format!("/{}/partials/{}.html", locale, name)
}

impl<'a> ChromeApi<'a> {
    /// Fetch both fragments for `locale`. A fragment that fails to load is
    /// left empty; the failure has already been reported.
    pub async fn load(&self, locale: Locale) -> SiteChrome {
        let content = self.content();
        let header_path = partial_path(locale, "header");
        let footer_path = partial_path(locale, "footer");
        let (header, footer) = tokio::join!(
            content.fetch_text(&header_path),
            content.fetch_text(&footer_path),
        );
        SiteChrome {
            header: header.unwrap_or_default(),
            footer: footer.unwrap_or_default(),
        }
    }
}

/// Fill the first empty `site-header` and `site-footer` placeholders of
/// `page`. Pages without placeholders come back unchanged.
pub fn inject(page: &str, chrome: &SiteChrome) -> String {
    let page = HEADER_SLOT.replace(page, NoExpand(chrome.header.as_str()));
    FOOTER_SLOT
        .replace(&page, NoExpand(chrome.footer.as_str()))
        .into_owned()
}
