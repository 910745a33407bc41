//! Auth decorators for API-gateway-fronted snapshot endpoints.

use async_trait::async_trait;
use reqwest::header::HeaderName;

use super::client::HttpClient;

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The Site Scanning API sits behind api.data.gov, which expects the key
/// in an `x-api-key` header.
pub struct ApiKey<C> {
    pub inner: C,
    pub header_name: String,
    pub key: String,
}

impl<C> ApiKey<C> {
    /// The api.data.gov convention: `x-api-key: <key>`.
    pub fn data_gov(inner: C, key: String) -> Self {
        Self {
            inner,
            header_name: "x-api-key".to_string(),
            key,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let header_name = HeaderName::from_bytes(self.header_name.as_bytes())
            .expect("ApiKey: invalid header name");
        req.headers_mut()
            .insert(header_name, self.key.parse().expect("ApiKey: invalid key"));
        self.inner.execute(req).await
    }
}

/// An [`HttpClient`] wrapper that appends the API key as a query
/// parameter instead, for gateways that reject custom headers.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    /// api.data.gov also accepts `?api_key=<key>`.
    pub fn data_gov(inner: C, key: String) -> Self {
        Self {
            inner,
            param_name: "api_key".to_string(),
            key,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
        self.inner.execute(req).await
    }
}
