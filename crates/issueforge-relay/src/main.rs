//! IssueForge Relay daemon
//!
//! HTTP relay that normalizes issue-creation requests and forwards them to
//! JIRA.

use anyhow::{Context, Result};
use clap::Parser;
use issueforge_jira::JiraConfig;
use issueforge_relay::{build_router, AppState};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "issueforged")]
#[command(about = "IssueForge relay - JIRA issue creation backend", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    bind: String,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .init();

    tracing::info!("IssueForge relay starting...");

    let config = JiraConfig::from_env().context("Failed to load JIRA configuration")?;
    tracing::info!("Tracker: {}", config.trimmed_base_url());
    tracing::info!("Default project: {}", config.default_project_key);

    let state = AppState::from_config(&config).context("Failed to initialize JIRA client")?;
    let app = build_router(state);

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    tracing::info!("Relay listening on {}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
