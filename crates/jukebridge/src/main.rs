use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use jukebridge::config::BridgeConfig;
use jukebridge::mixer::MixerClient;
use jukebridge::sync::JukeboxSyncer;
use jukebridge::web::{self, AppState};

/// The jukebridge snapshot relay
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a config file (replaces the local override)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Base URL of the remote mixer (overrides config)
    #[arg(long)]
    mixer_url: Option<String>,

    /// Log filter when RUST_LOG is unset (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        BridgeConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(port) = cli.port {
        config.bind.http_port = port;
    }
    if let Some(url) = cli.mixer_url {
        config.mixer.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.telemetry.log_level = level;
    }

    jukebridge::telemetry::init(&config.telemetry.log_level);

    let mixer = MixerClient::new(
        &config.mixer.base_url,
        Duration::from_millis(config.mixer.timeout_ms),
    );
    info!(mixer = %mixer.base_url(), "mixer client configured");

    let state = Arc::new(AppState::new(JukeboxSyncer::new(mixer)));
    let app = web::router(state);

    let addr = format!("0.0.0.0:{}", config.bind.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("jukebridge ready");
    info!("   Snapshots: POST http://{}/api/v1/record/event", addr);
    info!("   Start/stop: POST http://{}/api/v1/record/{{start,stop}}", addr);
    info!("   Health: GET http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{signal, SignalKind};
                let mut sigterm = signal(SignalKind::terminate()).expect("Failed to setup SIGTERM");
                sigterm.recv().await;
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
