//! Serverless instance resource.

use std::collections::BTreeMap;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method};

use crate::client::AnalyticsEngineClient;
use crate::error::AnalyticsEngineError;
use crate::http_client::HttpClient;
use crate::models::{
    CurrentResourceConsumption, Instance, InstanceGetStateResponse, InstanceHome,
    InstanceHomeRequest, LogForwardingConfig, ResourceConsumptionLimits, Runtime,
};

const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Operations on a serverless instance.
pub struct InstanceResource<'c, C: HttpClient> {
    client: &'c AnalyticsEngineClient<C>,
    instance_id: String,
}

impl<'c, C: HttpClient> InstanceResource<'c, C> {
    pub(crate) fn new(client: &'c AnalyticsEngineClient<C>, instance_id: String) -> Self {
        Self {
            client,
            instance_id,
        }
    }

    fn segments<'a>(&'a self, rest: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec!["v3", "analytics_engines", self.instance_id.as_str()];
        segments.extend_from_slice(rest);
        segments
    }

    /// Get the instance details.
    pub async fn get(&self) -> Result<Instance, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::GET, &self.segments(&[]), &[], None::<&()>)
            .await
    }

    /// Get the instance provisioning state.
    pub async fn get_state(&self) -> Result<InstanceGetStateResponse, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::GET, &self.segments(&["state"]), &[], None::<&()>)
            .await
    }

    /// Associate an object storage bucket as the instance home.
    pub async fn set_instance_home(
        &self,
        req: &InstanceHomeRequest,
    ) -> Result<InstanceHome, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::PUT, &self.segments(&["instance_home"]), &[], Some(req))
            .await
    }

    /// Get the default Spark configuration.
    pub async fn get_default_configs(
        &self,
    ) -> Result<BTreeMap<String, String>, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&["default_configs"]),
                &[],
                None::<&()>,
            )
            .await
    }

    /// Replace the default Spark configuration wholesale.
    pub async fn replace_default_configs(
        &self,
        configs: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::PUT,
                &self.segments(&["default_configs"]),
                &[],
                Some(configs),
            )
            .await
    }

    /// Merge changes into the default Spark configuration as a JSON merge patch.
    ///
    /// A `None` value removes that key.
    pub async fn update_default_configs(
        &self,
        changes: &BTreeMap<String, Option<String>>,
    ) -> Result<BTreeMap<String, String>, AnalyticsEngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MERGE_PATCH_JSON));
        self.client
            .inner
            .request_with_headers(
                Method::PATCH,
                &self.segments(&["default_configs"]),
                &[],
                &headers,
                Some(changes),
            )
            .await
    }

    /// Get the default Spark runtime.
    pub async fn get_default_runtime(&self) -> Result<Runtime, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&["default_runtime"]),
                &[],
                None::<&()>,
            )
            .await
    }

    /// Replace the default Spark runtime.
    pub async fn replace_default_runtime(
        &self,
        runtime: &Runtime,
    ) -> Result<Runtime, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::PUT,
                &self.segments(&["default_runtime"]),
                &[],
                Some(runtime),
            )
            .await
    }

    /// Cores and memory in use right now.
    pub async fn get_current_resource_consumption(
        &self,
    ) -> Result<CurrentResourceConsumption, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&["current_resource_consumption"]),
                &[],
                None::<&()>,
            )
            .await
    }

    pub async fn get_resource_consumption_limits(
        &self,
    ) -> Result<ResourceConsumptionLimits, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&["resource_consumption_limits"]),
                &[],
                None::<&()>,
            )
            .await
    }

    pub async fn replace_resource_consumption_limits(
        &self,
        limits: &ResourceConsumptionLimits,
    ) -> Result<ResourceConsumptionLimits, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::PUT,
                &self.segments(&["resource_consumption_limits"]),
                &[],
                Some(limits),
            )
            .await
    }

    pub async fn get_log_forwarding_config(
        &self,
    ) -> Result<LogForwardingConfig, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&["log_forwarding_config"]),
                &[],
                None::<&()>,
            )
            .await
    }

    pub async fn replace_log_forwarding_config(
        &self,
        config: &LogForwardingConfig,
    ) -> Result<LogForwardingConfig, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::PUT,
                &self.segments(&["log_forwarding_config"]),
                &[],
                Some(config),
            )
            .await
    }
}
