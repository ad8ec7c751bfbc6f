use anyhow::{Context, Result};
use reqwest::header;
use std::fmt;
use std::sync::Arc;
use url::Url;

use vitrine_common::message::{MessageSink, Severity};
use vitrine_i18n::t;

mod chrome;
mod content;
mod macros;

pub use chrome::{ChromeApi, SiteChrome, inject};
pub use content::ContentApi;

vitrine_i18n::init!();

const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

mod api_header {
    pub const ACCEPT_JSON: &str = "application/json";
    pub const ACCEPT_HTML: &str = "text/html";
}

pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) messages: Option<Arc<dyn MessageSink>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("messages", &self.messages.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// `base_url` is the site origin that request paths are resolved against.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base url: {}", base_url))?;
        let client = reqwest::Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
                headers
            })
            .build()
            .context("Failed to build http client")?;
        Ok(Self {
            client,
            base_url,
            messages: None,
        })
    }

    /// Route user-facing failure messages to `sink`. Without a sink failures
    /// are only logged.
    pub fn with_messages(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.messages = Some(sink);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn content(&self) -> ContentApi<'_> {
        ContentApi { api: self }
    }

    pub fn chrome(&self) -> ChromeApi<'_> {
        ChromeApi { api: self }
    }

    /// Resolve `path` the way a browser resolves a `fetch` argument against
    /// the current origin.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid resource path: {}", path))
    }

    pub(crate) fn report_failure(&self, resource: &str, error: &anyhow::Error) {
        tracing::error!("Failed to load {}: {:#}", resource, error);
        if let Some(sink) = &self.messages {
            sink.show(&t!("fetch.failed", resource = resource), Severity::Error);
        }
    }
}
