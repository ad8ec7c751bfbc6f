use crate::macros::{define_api_struct, use_common_crate};
use serde::de::DeserializeOwned;

use_common_crate!();
define_api_struct!(ContentApi);

impl<'a> ContentApi<'a> {
    /// Load a JSON document.
    ///
    /// Any failure (transport, non-success status, malformed body) is logged,
    /// reported once through the message surface, and turned into `None`.
    ///
    /// **Usage example**
    ///
    /// ```no_run
    /// # async fn run() -> anyhow::Result<()> {
    /// let client = vitrine_api::ApiClient::new("https://shop.example/")?;
    /// if let Some(points) = client.content().fetch_json("/api/fidelite/points").await {
    ///     println!("{}", points["balance"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_json(&self, path: &str) -> Option<serde_json::Value> {
        self.fetch_json_as(path).await
    }

    /// [`fetch_json`](Self::fetch_json) decoding straight into `T`. A body
    /// that doesn't match `T` counts as a parse failure.
    pub async fn fetch_json_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.try_fetch_json(path).await {
            Ok(value) => Some(value),
            Err(e) => {
                self.report_failure(path, &e);
                None
            }
        }
    }

    /// Load a text resource (HTML fragment, template) with the same failure
    /// policy as [`fetch_json`](Self::fetch_json).
    pub async fn fetch_text(&self, path: &str) -> Option<String> {
        match self.try_fetch_text(path).await {
            Ok(text) => Some(text),
            Err(e) => {
                self.report_failure(path, &e);
                None
            }
        }
    }

    async fn send(&self, path: &str, accept: &'static str) -> Result<reqwest::Response> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(anyhow!("{} responded with {}", path, res.status()));
        }
        Ok(res)
    }

    async fn try_fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let res = self.send(path, api_header::ACCEPT_JSON).await?;
        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn try_fetch_text(&self, path: &str) -> Result<String> {
        let res = self.send(path, api_header::ACCEPT_HTML).await?;
        Ok(res.text().await?)
    }
}
