//! Rust SDK for the Analytics Engine serverless Spark (v3) and cluster (v2) APIs.

mod backends;
mod client;
pub mod error;
mod http_client;
pub mod models;
mod pagination;
mod resources;

#[cfg(feature = "reqwest-client")]
pub use backends::ReqwestClient;
#[cfg(feature = "reqwest-client")]
pub use client::AnalyticsEngine;
pub use client::{
    AnalyticsEngineClient, ClientBuilder, ClientConfig, Credentials, DEFAULT_SERVICE_URL,
    DEFAULT_TIMEOUT, service_url_for_region,
};
pub use error::{AnalyticsEngineError, HttpClientError};
pub use http_client::{HttpClient, HttpRequest, HttpResponse};
pub use pagination::{ListRequest, Pager};
pub use resources::{ApplicationsPager, ApplicationsResource, ClusterResource, InstanceResource};
