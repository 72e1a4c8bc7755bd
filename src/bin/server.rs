//! Schema registry server
//!
//! Serves the registration and read endpoints over HTTP.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use schemabank::server::AppState;
use schemabank::{MemoryStore, RegistrationEngine, RegistryConfig, Validator};

#[derive(Parser)]
#[command(name = "schemabank-server")]
#[command(about = "Subject-versioned schema registry server")]
struct Cli {
    /// Path to a config file (overrides default lookup locations)
    #[arg(short, long)]
    config: Option<String>,

    /// Bind address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = RegistryConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let engine = RegistrationEngine::new(
        Arc::new(MemoryStore::new()),
        Validator::new(config.registration.format),
    )
    .with_lock_timeout(config.registration.lock_timeout());

    let state = Arc::new(AppState { engine });
    let app = schemabank::server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    tracing::info!(bind = %config.server.bind, "schema registry listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
