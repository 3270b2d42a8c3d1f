//! Request authorizer server.
//!
//! Loads configuration, provisions the configured credential store, and serves
//! authorizer decisions over HTTP until Ctrl-C.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use authorizer_server::bootstrap;
use authorizer_server::config::AppConfig;
use authorizer_server::http;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Fail-closed request authorizer for API gateways
#[derive(Parser, Debug)]
#[command(name = "authorizer-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override `server.bind_addr`
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        cfg.server.bind_addr = bind;
    }

    bootstrap::init_tracing(&cfg.logging)?;
    let authorizer = bootstrap::authorizer(&cfg).await?;

    let listener = TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    info!(addr = %listener.local_addr()?, "Authorizer listening");

    axum::serve(listener, http::router(authorizer))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Authorizer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
