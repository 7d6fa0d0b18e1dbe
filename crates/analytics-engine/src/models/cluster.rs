//! Provisioned cluster models (v2 API).

use serde::{Deserialize, Serialize};

/// A provisioned Hadoop/Spark cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_change_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<ClusterNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_credentials: Option<UserCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_endpoints: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private_endpoint_whitelist: Vec<String>,
}

/// A node of a [`Cluster`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    /// `management`, `master`, `data` or `task`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredentials {
    pub user: String,
}

/// Response of `GET /v2/analytics_engines/{guid}/state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterState {
    pub state: String,
}

/// Customization of cluster nodes, run by a script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationRequest {
    /// Node type to customize, e.g. `"data"`.
    pub target: String,
    pub custom_actions: Vec<CustomAction>,
}

/// One script run of a [`CustomizationRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAction {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<CustomActionScript>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script_params: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomActionScript {
    /// `http`, `https`, `ibm-cos` or `s3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_props: Option<serde_json::Value>,
}

/// Identifies a customization request after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationRequestRef {
    pub request_id: String,
}

/// Progress of a customization request across nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationRequestDetails {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_details: Option<serde_json::Value>,
}

/// Body of `POST /v2/analytics_engines/{guid}/resize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeRequest {
    /// Desired number of compute nodes.
    pub compute_nodes_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// New cluster password, as returned by `reset_password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub id: String,
    pub user_credentials: ResetUserCredentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetUserCredentials {
    pub user: String,
    pub password: String,
}

/// Log collection settings for a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_specs: Vec<LogSpec>,
    pub log_server: LoggingServer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSpec {
    /// e.g. `"ambari-server"`, `"spark-history-server"`.
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingServer {
    #[serde(rename = "type")]
    pub kind: String,
    pub credential: String,
    pub api_host: String,
    pub log_host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Whether IPs are being added to or removed from the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitelistAction {
    Add,
    Delete,
}

/// Body of `PATCH /v2/analytics_engines/{guid}/private_endpoint_whitelist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistRequest {
    /// CIDR ranges.
    pub ip_ranges: Vec<String>,
    pub action: WhitelistAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistResponse {
    #[serde(default)]
    pub private_endpoint_whitelist: Vec<String>,
}
