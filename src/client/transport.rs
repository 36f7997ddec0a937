//! HTTP transport over `reqwest`.
//!
//! On `wasm32` reqwest issues the request through the browser's `fetch`, so the
//! session cookie is attached by the browser itself.

use super::error::FetchError;
use super::fetcher::{ApiResponse, RequestOptions, Transport};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Resolves relative request paths against `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{base}{url}"),
            _ => url.to_string(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<ApiResponse, FetchError> {
        let mut request = self.client.get(self.resolve(url));
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(ApiResponse::new(status, body))
    }
}
