//! Command-line client for Analytics Engine serverless Spark instances and clusters.
use std::path::PathBuf;

use analytics_engine::AnalyticsEngine;
use clap::Parser;
use tracing::{debug, error};

mod app_config;
mod commands;
mod trc;

use crate::app_config::Config;
use crate::commands::Command;
use crate::trc::Trc;

#[derive(Parser)]
#[command(
    version,
    about = "Manage Spark applications on Analytics Engine instances."
)]
struct Args {
    #[arg(
        short,
        long,
        value_parser,
        help = "Optional path to a config TOML."
    )]
    config_path: Option<PathBuf>,

    #[arg(long, help = "Print plain log lines instead of spinners.")]
    plain: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main entry point for the application.
#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Errors use eprintln until tracing is initialized.
    if let Err(e) = Trc::default().plain(args.plain).init() {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let config = match Config::load(args.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    debug!(config = ?config, "Loaded configuration.");

    let client = match AnalyticsEngine::from_config(config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::run(args.command, &client, &config).await {
        error!("{e}");
        std::process::exit(1);
    }
}
