//! Error types for the Analytics Engine SDK.

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced by an [`HttpClient`](crate::HttpClient) backend.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection to the service could not be established or was dropped.
    #[error("could not reach {url}: {reason}")]
    Connection {
        /// Origin of the endpoint that was being contacted.
        url: String,
        reason: String,
    },

    /// Any other transport failure.
    #[error("HTTP client error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Top-level error returned by every SDK operation.
#[derive(Debug, Error)]
pub enum AnalyticsEngineError {
    /// The service answered with a non-success status code.
    #[error("API request failed with HTTP {status}")]
    ApiRequest {
        /// The HTTP status returned by the service.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The operation is not valid in the current state, e.g. paging past the last page.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// A list page did not have the shape the pager relies on.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The transport failed before a response was received.
    #[error(transparent)]
    Http(#[from] HttpClientError),

    /// A success response body could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AnalyticsEngineError {
    /// The HTTP status, if this error came from a service response.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ApiRequest { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parse the service's structured error body, if there is one.
    #[must_use]
    pub fn api_error_body(&self) -> Option<ApiErrorBody> {
        match self {
            Self::ApiRequest { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// The first human-readable message the service attached to the failure.
    #[must_use]
    pub fn api_message(&self) -> Option<String> {
        let body = self.api_error_body()?;
        body.errors
            .into_iter()
            .find_map(|e| e.message)
            .or(body.message)
    }
}

/// Error body returned by the service on failed requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Individual error entries.
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
    /// Request trace identifier, useful when contacting support.
    pub trace: Option<String>,
    /// Some older endpoints report a single top-level message instead of `errors`.
    pub message: Option<String>,
}

/// One entry of [`ApiErrorBody::errors`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEntry {
    /// Machine-readable error code.
    pub code: Option<String>,
    /// Human-readable description.
    pub message: Option<String>,
    /// Link to more information about the error.
    pub more_info: Option<String>,
}
