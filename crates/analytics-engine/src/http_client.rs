//! HTTP transport abstraction, so the SDK can run over any client.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::future::Future;
use url::Url;

use crate::error::HttpClientError;

/// A fully-built request handed to an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: Method,
    /// Absolute URL, including the encoded query string.
    pub url: Url,
    /// Request headers, authorization included.
    pub headers: HeaderMap,
    /// Optional JSON body.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Look up a decoded query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// The raw response returned by an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body bytes.
    pub body: Bytes,
}

/// Pluggable transport used by [`AnalyticsEngineClient`](crate::AnalyticsEngineClient).
///
/// Timeouts and retries belong to the implementation; the SDK treats every
/// `Err` as final for the call that produced it.
pub trait HttpClient: Send + Sync {
    /// Send a request and return whatever the server answered, success or not.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send;
}
