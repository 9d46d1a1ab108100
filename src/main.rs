//! SEO edge server.
//!
//! Sits in front of a static blog and rewrites the `<head>` of post pages
//! with metadata fetched from the blog API.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                   SEO EDGE                    │
//!   Client Request    │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│ routing  │──▶│ functions  │  │
//!                     │  │ server │   │ + slug   │   │ seo / ping │  │
//!                     │  └────────┘   └──────────┘   └─────┬──────┘  │
//!                     │                                    │         │
//!                     │               ┌────────────┐       │         │──── Blog API
//!                     │               │   posts    │◀──────┤         │
//!                     │               └────────────┘       │         │
//!                     │               ┌────────────┐       │         │──── Static
//!                     │               │   origin   │◀──────┘         │     origin
//!   Client Response   │  ┌────────┐   └─────┬──────┘                 │
//!   ◀─────────────────┼──│  meta  │◀────────┘                        │
//!                     │  │rewrite │                                  │
//!                     │  └────────┘                                  │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use seo_edge::config::{load_config, ConfigWatcher, EdgeConfig};
use seo_edge::lifecycle::{signals, Shutdown};
use seo_edge::observability::{logging, metrics};
use seo_edge::HttpServer;

#[derive(Parser)]
#[command(name = "seo-edge")]
#[command(about = "Edge server that injects blog post meta tags", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Watched for changes.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!("seo-edge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.origin.address,
        api = %config.api.base_url,
        functions = config.functions.len(),
        "Configuration loaded"
    );

    // Keep the watcher alive for the lifetime of the server.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
