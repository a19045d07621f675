mod api;
mod cli;
mod config;
mod db;
mod predictor;
mod seed;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::db::Database;
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            let config = Arc::new(Config::from_env()?);

            tokio::select! {
                server_result = api::run_server(Arc::clone(&config)) => server_result,
                _ = signal::ctrl_c() => {
                    info!("shutdown signal received");
                    Ok(())
                }
            }
        }
        Commands::Seed { keep_existing } => {
            let config = Config::from_env()?;
            seed::run(&config, keep_existing)
        }
        Commands::Status => handle_status(),
    }
}

fn handle_status() -> Result<()> {
    let config = Config::from_env()?;
    let database = Database::open(&config.db_path)?;

    println!("FitTrack status");
    println!("- db_path: {}", config.db_path.display());
    println!("- api_port: {}", config.api_port);
    println!("- ml_endpoint: {}/predict", config.ml_base_url);
    println!("- activity_count: {}", database.activity_count()?);
    println!(
        "- last_logged_at: {}",
        database
            .latest_activity_date()?
            .map(|date| date.to_rfc3339())
            .unwrap_or_else(|| "none".to_string())
    );

    Ok(())
}
