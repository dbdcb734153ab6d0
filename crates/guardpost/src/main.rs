//! Guardpost service binary
//!
//! Loads configuration, wires the services together, and serves HTTP
//! until the process is stopped.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gp_generation::OllamaGenerator;
use gp_server::AppState;

#[derive(Parser)]
#[command(name = "guardpost", version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = gp_config::load_config(&args.config)
        .await
        .context("loading configuration")?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {host}:{port}"))?;

    info!(model = %config.prediction.model, "using Ollama generation backend");
    let generator = Arc::new(OllamaGenerator::new(config.prediction.model.clone()));

    let state = AppState::new(&config, generator)?;
    gp_server::serve(state, addr).await?;

    Ok(())
}
