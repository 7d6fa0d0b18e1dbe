//! Client configuration, construction, and the shared request executor.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::AnalyticsEngineError;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::resources::{ApplicationsResource, ClusterResource, InstanceResource};

/// Service URL used when none is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.ae.cloud.ibm.com";

/// Default per-request timeout for the bundled backend.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_USER_AGENT: &str = concat!("analytics-engine-rust/", env!("CARGO_PKG_VERSION"));

/// Build the service URL for a region such as `us-south` or `eu-de`.
pub fn service_url_for_region(region: &str) -> Result<String, AnalyticsEngineError> {
    let valid = !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(AnalyticsEngineError::InvalidRequest(format!(
            "'{region}' is not a valid region name"
        )));
    }
    Ok(format!("https://api.{region}.ae.cloud.ibm.com"))
}

/// How requests are authenticated.
///
/// Obtaining a token is the caller's business; the SDK only attaches it.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// Send no `Authorization` header.
    #[default]
    None,
    /// Send `Authorization: Bearer <token>`.
    Bearer(SecretString),
}

/// Everything a client needs to talk to the service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. [`DEFAULT_SERVICE_URL`].
    pub service_url: String,
    /// Request authentication.
    pub credentials: Credentials,
    /// Request timeout handed to the bundled backend.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Headers added to every request. Per-request overrides win.
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_owned(),
            credentials: Credentials::None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            default_headers: HeaderMap::new(),
        }
    }
}

/// Fluent builder for [`AnalyticsEngineClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start from [`ClientConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service base URL.
    #[must_use]
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.config.service_url = url.into();
        self
    }

    /// Point the client at the public endpoint of `region`.
    pub fn region(mut self, region: &str) -> Result<Self, AnalyticsEngineError> {
        self.config.service_url = service_url_for_region(region)?;
        Ok(self)
    }

    /// Authenticate with a bearer token.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.credentials = Credentials::Bearer(SecretString::from(token.into()));
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.config.default_headers.insert(name, value);
        self
    }

    /// Finish with a caller-supplied transport.
    pub fn build_with_http_client<C: HttpClient>(
        self,
        http: C,
    ) -> Result<AnalyticsEngineClient<C>, AnalyticsEngineError> {
        AnalyticsEngineClient::new(self.config, http)
    }

    /// Finish with the bundled reqwest transport.
    #[cfg(feature = "reqwest-client")]
    pub fn build(self) -> Result<AnalyticsEngine, AnalyticsEngineError> {
        AnalyticsEngine::from_config(self.config)
    }
}

/// State shared between a client, its resources, and its pagers.
pub(crate) struct ClientInner<C: HttpClient> {
    base_url: Url,
    config: ClientConfig,
    http: C,
}

impl<C: HttpClient> ClientInner<C> {
    fn endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, AnalyticsEngineError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AnalyticsEngineError::InvalidRequest(format!(
                    "service URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn headers(
        &self,
        overrides: &HeaderMap,
        has_body: bool,
    ) -> Result<HeaderMap, AnalyticsEngineError> {
        let mut headers = self.config.default_headers.clone();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let user_agent = HeaderValue::from_str(&self.config.user_agent).map_err(|_| {
            AnalyticsEngineError::InvalidRequest("user agent is not a valid header value".into())
        })?;
        headers.insert(USER_AGENT, user_agent);

        if let Credentials::Bearer(token) = &self.config.credentials {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| {
                    AnalyticsEngineError::InvalidRequest(
                        "bearer token is not a valid header value".into(),
                    )
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }

    /// Send one request and fail on any non-2xx status.
    ///
    /// `segments` are percent-encoded individually, so path parameters may
    /// contain reserved characters.
    pub(crate) async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        header_overrides: &HeaderMap,
        body: Option<Bytes>,
    ) -> Result<HttpResponse, AnalyticsEngineError> {
        let request = HttpRequest {
            url: self.endpoint(segments, query)?,
            headers: self.headers(header_overrides, body.is_some())?,
            method,
            body,
        };

        debug!(method = %request.method, url = %request.url, "Sending request.");
        let method = request.method.clone();
        let response = self.http.send(request).await?;
        debug!(%method, status = %response.status, "Received response.");

        if !response.status.is_success() {
            return Err(AnalyticsEngineError::ApiRequest {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(response)
    }

    /// Send a request with an optional JSON body and decode a JSON response.
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, AnalyticsEngineError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_headers(method, segments, query, &HeaderMap::new(), body)
            .await
    }

    /// Like [`Self::request`], with headers that override the defaults.
    pub(crate) async fn request_with_headers<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        header_overrides: &HeaderMap,
        body: Option<&B>,
    ) -> Result<T, AnalyticsEngineError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_vec).transpose()?.map(Bytes::from);
        let response = self
            .execute(method, segments, query, header_overrides, body)
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Like [`Self::request`], for endpoints that answer without a body.
    pub(crate) async fn request_no_content<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<(), AnalyticsEngineError>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_vec).transpose()?.map(Bytes::from);
        self.execute(method, segments, &[], &HeaderMap::new(), body)
            .await?;
        Ok(())
    }
}

/// Entry point of the SDK, generic over the HTTP transport.
pub struct AnalyticsEngineClient<C: HttpClient> {
    pub(crate) inner: Arc<ClientInner<C>>,
}

impl<C: HttpClient> Clone for AnalyticsEngineClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: HttpClient> AnalyticsEngineClient<C> {
    /// Create a client from an explicit configuration and transport.
    pub fn new(config: ClientConfig, http: C) -> Result<Self, AnalyticsEngineError> {
        let base_url = Url::parse(&config.service_url).map_err(|e| {
            AnalyticsEngineError::InvalidRequest(format!(
                "invalid service URL '{}': {e}",
                config.service_url
            ))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AnalyticsEngineError::InvalidRequest(format!(
                "service URL '{base_url}' must use http or https"
            )));
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                config,
                http,
            }),
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Operations on a serverless instance.
    #[must_use]
    pub fn instance(&self, instance_id: impl Into<String>) -> InstanceResource<'_, C> {
        InstanceResource::new(self, instance_id.into())
    }

    /// Operations on the Spark applications of a serverless instance.
    #[must_use]
    pub fn applications(&self, instance_id: impl Into<String>) -> ApplicationsResource<'_, C> {
        ApplicationsResource::new(self, instance_id.into())
    }

    /// Operations on a provisioned (v2) analytics cluster.
    #[must_use]
    pub fn cluster(&self, instance_guid: impl Into<String>) -> ClusterResource<'_, C> {
        ClusterResource::new(self, instance_guid.into())
    }
}

/// A client using the bundled [`ReqwestClient`](crate::ReqwestClient) transport.
#[cfg(feature = "reqwest-client")]
pub type AnalyticsEngine = AnalyticsEngineClient<crate::backends::ReqwestClient>;

#[cfg(feature = "reqwest-client")]
impl AnalyticsEngine {
    /// Create a reqwest-backed client honoring `config.timeout`.
    pub fn from_config(config: ClientConfig) -> Result<Self, AnalyticsEngineError> {
        let http = crate::backends::ReqwestClient::new(config.timeout)?;
        Self::new(config, http)
    }
}
