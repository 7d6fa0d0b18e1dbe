//! Provisioned cluster resource (v2 API).

use http::Method;

use crate::client::AnalyticsEngineClient;
use crate::error::AnalyticsEngineError;
use crate::http_client::HttpClient;
use crate::models::{
    Cluster, ClusterState, CustomizationRequest, CustomizationRequestDetails,
    CustomizationRequestRef, LoggingConfig, ResetPasswordResponse, ResizeRequest, ResizeResponse,
    WhitelistRequest, WhitelistResponse,
};

/// Operations on a provisioned Hadoop/Spark cluster.
pub struct ClusterResource<'c, C: HttpClient> {
    client: &'c AnalyticsEngineClient<C>,
    instance_guid: String,
}

impl<'c, C: HttpClient> ClusterResource<'c, C> {
    pub(crate) fn new(client: &'c AnalyticsEngineClient<C>, instance_guid: String) -> Self {
        Self {
            client,
            instance_guid,
        }
    }

    fn segments<'a>(&'a self, rest: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec!["v2", "analytics_engines", self.instance_guid.as_str()];
        segments.extend_from_slice(rest);
        segments
    }

    /// Get cluster details.
    pub async fn get(&self) -> Result<Cluster, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::GET, &self.segments(&[]), &[], None::<&()>)
            .await
    }

    /// Get the cluster state.
    pub async fn get_state(&self) -> Result<ClusterState, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::GET, &self.segments(&["state"]), &[], None::<&()>)
            .await
    }

    /// Run customization scripts on cluster nodes.
    pub async fn create_customization_request(
        &self,
        req: &CustomizationRequest,
    ) -> Result<CustomizationRequestRef, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::POST,
                &self.segments(&["customization_requests"]),
                &[],
                Some(req),
            )
            .await
    }

    /// List every customization request made against this cluster.
    pub async fn list_customization_requests(
        &self,
    ) -> Result<Vec<CustomizationRequestRef>, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&["customization_requests"]),
                &[],
                None::<&()>,
            )
            .await
    }

    pub async fn get_customization_request(
        &self,
        request_id: &str,
    ) -> Result<CustomizationRequestDetails, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&["customization_requests", request_id]),
                &[],
                None::<&()>,
            )
            .await
    }

    /// Change the number of compute nodes.
    pub async fn resize(
        &self,
        req: &ResizeRequest,
    ) -> Result<ResizeResponse, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::POST, &self.segments(&["resize"]), &[], Some(req))
            .await
    }

    /// Generate a new cluster password. The response is the only place it appears.
    pub async fn reset_password(&self) -> Result<ResetPasswordResponse, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::POST,
                &self.segments(&["reset_password"]),
                &[],
                None::<&()>,
            )
            .await
    }

    pub async fn get_logging_config(&self) -> Result<LoggingConfig, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::GET, &self.segments(&["log_config"]), &[], None::<&()>)
            .await
    }

    /// Start shipping cluster logs to a log server.
    pub async fn configure_logging(&self, req: &LoggingConfig) -> Result<(), AnalyticsEngineError> {
        self.client
            .inner
            .request_no_content(Method::PUT, &self.segments(&["log_config"]), Some(req))
            .await
    }

    pub async fn delete_logging_config(&self) -> Result<(), AnalyticsEngineError> {
        self.client
            .inner
            .request_no_content(Method::DELETE, &self.segments(&["log_config"]), None::<&()>)
            .await
    }

    /// Add or remove CIDR ranges on the private endpoint whitelist.
    pub async fn update_private_endpoint_whitelist(
        &self,
        req: &WhitelistRequest,
    ) -> Result<WhitelistResponse, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::PATCH,
                &self.segments(&["private_endpoint_whitelist"]),
                &[],
                Some(req),
            )
            .await
    }
}
