//! Bundled [`HttpClient`](crate::HttpClient) implementations.

#[cfg(feature = "reqwest-client")]
mod reqwest_client;
#[cfg(feature = "reqwest-client")]
pub use reqwest_client::ReqwestClient;
