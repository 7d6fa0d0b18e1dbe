//! Serverless instance models (v3 API).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Provisioning state of a serverless instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Created,
    Deleted,
    Disabled,
    Failed,
    Provisioning,
    Active,
    #[serde(other)]
    Unknown,
}

/// Spark runtime selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    /// Spark version, e.g. `"3.4"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_version: Option<String>,
    /// Extra packages installed into the runtime.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_packages: Vec<String>,
}

/// Spark configuration applied to every application by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDefaultConfig {
    #[serde(default)]
    pub key_value_map: BTreeMap<String, String>,
}

/// Object storage bucket the instance uses as its home.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceHome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_access_key: Option<String>,
    /// Only ever sent, the service masks it in responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_secret_key: Option<String>,
}

/// Body of `PUT /v3/analytics_engines/{id}/instance_home`.
pub type InstanceHomeRequest = InstanceHome;

/// Serverless instance details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<InstanceState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_change_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_runtime: Option<Runtime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_home: Option<InstanceHome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_config: Option<InstanceDefaultConfig>,
}

/// Response of `GET /v3/analytics_engines/{id}/state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceGetStateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub state: InstanceState,
}

/// Cores and memory currently held by running applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentResourceConsumption {
    /// e.g. `"8"`.
    pub cores: String,
    /// e.g. `"32G"`.
    pub memory: String,
}

/// Upper bounds on what the instance may consume at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConsumptionLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cores: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory: Option<String>,
}

/// Where driver and executor logs are shipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogForwardingConfig {
    /// Log sources, e.g. `["spark-driver", "spark-executor"]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_server: Option<LogServer>,
    pub enabled: bool,
}

/// Log server a [`LogForwardingConfig`] targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogServer {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
