//! HTTP client wrapper for the SubX API.
//!
//! One [`ApiClient`] is created per provider instance and reused across
//! calls for connection pooling. JSON calls place parameters on the query
//! string for read-style methods and in a form-encoded body for
//! write-style methods; the streaming download path pins a fixed
//! per-attempt timeout and drains the body into memory.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::FetchError;
use super::headers::apply_headers;

/// Fixed ceiling for one streaming download attempt.
const DOWNLOAD_TIMEOUT_SECS: u64 = 90;

/// HTTP client for SubX API calls.
///
/// JSON requests use the transport's default timeout; only the download
/// path enforces an explicit ceiling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Creates a new client with transparent gzip/deflate decompression.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let client = Client::builder()
            .gzip(true)
            .deflate(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Performs a JSON API call.
    ///
    /// `params` are attached as a URL-encoded query string for GET and
    /// DELETE and sent as a form-encoded body for POST, PUT, and PATCH.
    /// `headers` are applied with the two-tier strategy; entries the
    /// request map rejects are logged and do not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the URL is invalid, the transport
    /// fails, the server responds with a non-success status, or the body
    /// does not decode as `T`.
    #[instrument(skip(self, params, headers), fields(url = %url, method = %method))]
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        params: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<T, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let mut request = self.client.request(method.clone(), parsed);

        if !params.is_empty() {
            if method == Method::GET || method == Method::DELETE {
                request = request.query(params);
            } else if method == Method::POST || method == Method::PUT || method == Method::PATCH {
                request = request.form(params);
            }
        }

        let applied = apply_headers(headers);
        for (name, _) in &applied.overflow {
            warn!(url = %url, header = %name, "dropping header the request could not carry");
        }
        request = request.headers(applied.headers);

        debug!(url = %url, method = %method, "issuing API request");

        let response = request
            .send()
            .await
            .map_err(|source| FetchError::from_transport(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::decode(url, source))
    }

    /// Fetches a binary payload, draining the body into memory.
    ///
    /// Sends `Accept: */*` and, when a non-empty token is supplied,
    /// `Authorization: Bearer {token}`. gzip/deflate transport encodings
    /// are decompressed transparently. Each call is bounded by a fixed
    /// 90-second ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the URL is invalid, the transport
    /// fails or times out, or the server responds with a non-success
    /// status.
    #[instrument(skip(self, bearer_token), fields(url = %url))]
    pub async fn fetch_stream(
        &self,
        url: &str,
        bearer_token: Option<&str>,
    ) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let mut request = self
            .client
            .get(parsed)
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .header(ACCEPT, "*/*");

        if let Some(token) = bearer_token
            && !token.is_empty()
        {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| FetchError::from_transport(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let mut stream = response.bytes_stream();
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| FetchError::from_transport(url, source))?;
            buffer.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = buffer.len(), "payload fetched");
        Ok(buffer)
    }
}
