//! Subcommand definitions and their execution against the SDK.

use std::num::NonZeroU32;
use std::path::PathBuf;

use analytics_engine::models::{
    Application, ApplicationRequest, ApplicationState, ListApplicationsParams,
};
use analytics_engine::{AnalyticsEngine, AnalyticsEngineError};
use clap::Subcommand;
use serde::Serialize;
use thiserror::Error;
use tracing::{Instrument as _, info, info_span};

use crate::app_config::Config;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", describe_api_error(.0))]
    Api(#[from] AnalyticsEngineError),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No instance given. Pass --instance-id or set instance-id in the config.")]
    MissingInstanceId,
}

fn describe_api_error(err: &AnalyticsEngineError) -> String {
    match err.api_message() {
        Some(message) => format!("{err}: {message}"),
        None => err.to_string(),
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect a serverless instance.
    Instance {
        #[arg(long, help = "Instance to inspect. Defaults to the configured instance.")]
        instance_id: Option<String>,

        #[command(subcommand)]
        action: InstanceAction,
    },

    /// Submit, list and manage Spark applications.
    Apps {
        #[arg(long, help = "Instance owning the applications. Defaults to the configured instance.")]
        instance_id: Option<String>,

        #[command(subcommand)]
        action: AppsAction,
    },

    /// Inspect a provisioned (v2) cluster.
    Cluster {
        /// GUID of the cluster's service instance.
        instance_guid: String,

        #[command(subcommand)]
        action: ClusterAction,
    },
}

#[derive(Subcommand)]
pub enum InstanceAction {
    /// Show instance details.
    Show,
    /// Show the provisioning state.
    State,
    /// Show cores and memory currently in use.
    ResourceConsumption,
}

#[derive(Subcommand)]
pub enum AppsAction {
    /// List applications, one page unless --all is given.
    List {
        #[arg(long, help = "Only list applications in this state. Repeatable.")]
        state: Vec<ApplicationState>,

        #[arg(long, help = "Page size.")]
        limit: Option<NonZeroU32>,

        #[arg(long, help = "Cursor to resume listing from.")]
        start: Option<String>,

        #[arg(long, help = "Follow next links until every page is fetched.")]
        all: bool,
    },
    /// Show one application.
    Show { application_id: String },
    /// Show the state of one application.
    State { application_id: String },
    /// Stop one application.
    Delete { application_id: String },
    /// Submit an application described by a JSON file.
    Submit { file: PathBuf },
}

#[derive(Subcommand)]
pub enum ClusterAction {
    /// Show cluster details.
    Show,
    /// Show the cluster state.
    State,
}

#[derive(Serialize)]
struct ApplicationPage {
    applications: Vec<Application>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_start: Option<String>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn instance_id(flag: Option<String>, config: &Config) -> Result<String, CliError> {
    flag.or_else(|| config.instance_id.clone())
        .ok_or(CliError::MissingInstanceId)
}

pub async fn run(
    command: Command,
    client: &AnalyticsEngine,
    config: &Config,
) -> Result<(), CliError> {
    match command {
        Command::Instance {
            instance_id: flag,
            action,
        } => {
            let instance = client.instance(instance_id(flag, config)?);
            match action {
                InstanceAction::Show => print_json(&instance.get().await?),
                InstanceAction::State => print_json(&instance.get_state().await?),
                InstanceAction::ResourceConsumption => {
                    print_json(&instance.get_current_resource_consumption().await?)
                }
            }
        }
        Command::Apps {
            instance_id: flag,
            action,
        } => run_apps(client, instance_id(flag, config)?, action).await,
        Command::Cluster {
            instance_guid,
            action,
        } => {
            let cluster = client.cluster(instance_guid);
            match action {
                ClusterAction::Show => print_json(&cluster.get().await?),
                ClusterAction::State => print_json(&cluster.get_state().await?),
            }
        }
    }
}

async fn run_apps(
    client: &AnalyticsEngine,
    instance_id: String,
    action: AppsAction,
) -> Result<(), CliError> {
    let applications = client.applications(instance_id);
    match action {
        AppsAction::List {
            state,
            limit,
            start,
            all,
        } => {
            let params = ListApplicationsParams {
                state,
                limit,
                start,
                ..ListApplicationsParams::default()
            };
            let mut pager = applications.list_all(&params);

            let page = if all {
                let items = pager
                    .get_all()
                    .instrument(info_span!("Listing every application"))
                    .await?;
                info!(count = items.len(), "Fetched all applications.");
                ApplicationPage {
                    applications: items,
                    next_start: None,
                }
            } else {
                let items = pager.get_next().await?;
                ApplicationPage {
                    applications: items,
                    next_start: pager.cursor().map(ToOwned::to_owned),
                }
            };
            print_json(&page)
        }
        AppsAction::Show { application_id } => {
            print_json(&applications.get(&application_id).await?)
        }
        AppsAction::State { application_id } => {
            print_json(&applications.get_state(&application_id).await?)
        }
        AppsAction::Delete { application_id } => {
            applications.delete(&application_id).await?;
            info!(%application_id, "Application stopped.");
            Ok(())
        }
        AppsAction::Submit { file } => {
            let content = std::fs::read_to_string(&file).map_err(|source| CliError::ReadFile {
                path: file.clone(),
                source,
            })?;
            let request: ApplicationRequest = serde_json::from_str(&content)?;
            print_json(&applications.create(&request).await?)
        }
    }
}
