//! Spark application models (v3 serverless API).

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::instance::Runtime;
use super::pagination::{PageLink, Paginated};

/// Lifecycle state of a Spark application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationState {
    Accepted,
    Submitted,
    Waiting,
    Running,
    Finished,
    Failed,
    Error,
    Stopped,
    AutoTerminated,
    OpsTerminated,
    /// A state this SDK version does not know about.
    #[serde(other)]
    Unknown,
}

impl ApplicationState {
    /// The wire name, as used in the `state` query filter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Submitted => "submitted",
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Stopped => "stopped",
            Self::AutoTerminated => "auto_terminated",
            Self::OpsTerminated => "ops_terminated",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = match s {
            "accepted" => Self::Accepted,
            "submitted" => Self::Submitted,
            "waiting" => Self::Waiting,
            "running" => Self::Running,
            "finished" => Self::Finished,
            "failed" => Self::Failed,
            "error" => Self::Error,
            "stopped" => Self::Stopped,
            "auto_terminated" => Self::AutoTerminated,
            "ops_terminated" => Self::OpsTerminated,
            other => return Err(format!("unknown application state '{other}'")),
        };
        Ok(state)
    }
}

/// Filters and paging options for listing applications.
///
/// Time intervals use the service's `<lower>,<upper>` syntax with RFC 3339
/// timestamps, either bound optionally left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListApplicationsParams {
    /// Only return applications in one of these states.
    pub state: Vec<ApplicationState>,
    /// Filter on when the Spark application started running.
    pub start_time_interval: Option<String>,
    /// Filter on when the application was submitted.
    pub submission_time_interval: Option<String>,
    /// Filter on when the Spark application ended.
    pub end_time_interval: Option<String>,
    /// Filter on when the application reached a final state.
    pub finish_time_interval: Option<String>,
    /// Page size.
    pub limit: Option<NonZeroU32>,
    /// Cursor to resume from. `None` starts at the first page.
    pub start: Option<String>,
}

impl ListApplicationsParams {
    /// Query parameters for these filters, excluding `start`.
    ///
    /// `start` is left out because the pager owns the cursor once listing begins.
    pub(crate) fn filter_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if !self.state.is_empty() {
            let joined = self
                .state
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("state".to_owned(), joined));
        }

        let intervals = [
            ("start_time_interval", &self.start_time_interval),
            ("submission_time_interval", &self.submission_time_interval),
            ("end_time_interval", &self.end_time_interval),
            ("finish_time_interval", &self.finish_time_interval),
        ];
        for (name, value) in intervals {
            if let Some(v) = value {
                query.push((name.to_owned(), v.clone()));
            }
        }

        if let Some(limit) = self.limit {
            query.push(("limit".to_owned(), limit.to_string()));
        }
        query
    }
}

/// Submission payload for a Spark application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub application_details: ApplicationDetails,
}

/// What to run and how.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDetails {
    /// Path of the application file, e.g. `cos://bucket.store/app.py`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Runtime>,
    /// Comma-separated jar paths for the driver and executor classpaths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jars: Option<String>,
    /// Comma-separated Maven coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archives: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Entry point class for Java/Scala applications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    /// Spark configuration overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conf: BTreeMap<String, String>,
    /// Environment variables for the driver and executors.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub state: ApplicationState,
}

/// One entry of an [`ApplicationCollection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_application_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ApplicationState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_termination_time: Option<String>,
}

/// One page of `GET /v3/analytics_engines/{id}/spark_applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCollection {
    pub applications: Vec<Application>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<PageLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
    /// Echo of the requested page size. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Server estimate of the total. Informational; never used to stop paging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl Paginated for ApplicationCollection {
    type Item = Application;

    fn into_items(self) -> Vec<Application> {
        self.applications
    }

    fn next_link(&self) -> Option<&PageLink> {
        self.next.as_ref()
    }
}

/// Detail view of a single application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationGetResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_details: Option<ApplicationDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_application_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ApplicationState>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state_details: Vec<ApplicationStateDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_termination_time: Option<String>,
}

/// Why an application is in its current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStateDetail {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// State view of a single application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationGetStateResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ApplicationState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_query_joins_states_and_skips_start() {
        let params = ListApplicationsParams {
            state: vec![ApplicationState::Finished, ApplicationState::Failed],
            limit: NonZeroU32::new(10),
            start: Some("ignored".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            params.filter_query(),
            vec![
                ("state".to_owned(), "finished,failed".to_owned()),
                ("limit".to_owned(), "10".to_owned()),
            ]
        );
    }

    #[test]
    fn filter_query_includes_intervals_in_fixed_order() {
        let params = ListApplicationsParams {
            end_time_interval: Some(",2024-01-02T00:00:00Z".to_owned()),
            start_time_interval: Some("2024-01-01T00:00:00Z,".to_owned()),
            ..Default::default()
        };
        let names: Vec<String> = params.filter_query().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["start_time_interval", "end_time_interval"]);
    }

    #[test]
    fn unknown_state_decodes_as_unknown() {
        let state: ApplicationState = serde_json::from_str(r#""hibernating""#).unwrap();
        assert_eq!(state, ApplicationState::Unknown);
        assert_eq!(
            "auto_terminated".parse::<ApplicationState>().unwrap(),
            ApplicationState::AutoTerminated
        );
        assert!("bogus".parse::<ApplicationState>().is_err());
    }

    #[test]
    fn collection_without_next_has_no_next_link() {
        let page: ApplicationCollection = serde_json::from_str(
            r#"{"applications":[{"id":"a1","state":"running"}],"limit":1,"total_count":99}"#,
        )
        .unwrap();
        assert!(page.next_link().is_none());
        assert_eq!(page.into_items()[0].state, Some(ApplicationState::Running));
    }
}
