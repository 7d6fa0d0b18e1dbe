//! Reqwest-based HTTP client backend.

use std::time::Duration;

use tracing::trace;

use crate::error::HttpClientError;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};

/// An [`HttpClient`] backed by an async [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpClientError::Other(Box::new(e)))?;
        Ok(Self { client })
    }

    /// Wrap an already configured [`reqwest::Client`].
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        // Only the origin goes into errors; paths and cursors stay out of them.
        let origin = url.origin().ascii_serialization();
        trace!(%method, %url, "Dispatching over reqwest.");

        let mut outgoing = reqwest::Request::new(method, url);
        *outgoing.headers_mut() = headers;
        *outgoing.body_mut() = body.map(reqwest::Body::from);

        let response = self
            .client
            .execute(outgoing)
            .await
            .map_err(|e| transport_error(e, &origin))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, &origin))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(err: reqwest::Error, origin: &str) -> HttpClientError {
    if err.is_timeout() {
        return HttpClientError::Timeout;
    }
    if err.is_connect() {
        return HttpClientError::Connection {
            url: origin.to_owned(),
            reason: err.without_url().to_string(),
        };
    }
    HttpClientError::Other(Box::new(err))
}

#[cfg(test)]
mod tests {
    use http::{HeaderMap, Method};
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn refused_connection_names_the_origin() {
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
        let request = HttpRequest {
            method: Method::GET,
            url: Url::parse("http://127.0.0.1:1/v3/analytics_engines/x?start=secret-cursor")
                .unwrap(),
            headers: HeaderMap::new(),
            body: None,
        };

        match client.send(request).await {
            Err(HttpClientError::Connection { url, reason }) => {
                assert_eq!(url, "http://127.0.0.1:1");
                assert!(!reason.contains("secret-cursor"), "{reason}");
            }
            other => panic!("expected a connection error, got {other:?}"),
        }
    }
}
