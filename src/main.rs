//! wirespec-serve
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request (Host: <tenant>.serve.example)
//!     ───────────────────┐
//!                        ▼
//!                 ┌─────────────┐     ┌──────────────┐
//!                 │ http server │────▶│ store gateway│──── BlobStore
//!                 └──────┬──────┘     └──────────────┘
//!                        │ tenant known?
//!            no ┌────────┴────────┐ yes
//!               ▼                 ▼
//!        ┌────────────┐    ┌─────────────┐    ┌────────────┐
//!        │ submission │    │ route table │───▶│ dispatcher │
//!        │ parse+hash │    └─────────────┘    └─────┬──────┘
//!        └────────────┘                             ▼
//!                                           ┌──────────────┐
//!                                           │ mock resolver│──── front-end
//!                                           └──────────────┘      generate
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use wirespec_serve::config::{load_config, validate_config, ConfigError, ServeConfig};
use wirespec_serve::lifecycle::{signals, startup};
use wirespec_serve::observability::{logging, metrics};
use wirespec_serve::Shutdown;

#[derive(Parser)]
#[command(name = "wirespec-serve")]
#[command(about = "Serve mock APIs from stored wirespec specifications", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServeConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wirespec-serve starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = startup::build_server(config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
