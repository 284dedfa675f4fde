mod action;
mod app;
mod app_state;
mod component;
mod components;
mod http;
mod i18n;
mod registry;
mod render;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use preview_proto::client::HttpMetadataClient;
use preview_proto::config::Config;
use preview_proto::controller::FetchController;

use crate::i18n::{Catalog, Locale};

const DEFAULT_LOG_FILTER: &str = "debug,hyper_util=warn,reqwest=warn,hyper=warn";

/// Terminal link preview card
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to preview on startup
    address: Option<String>,

    /// Fetch one address, print the resulting state as JSON and exit
    #[arg(long, value_name = "ADDRESS", conflicts_with = "address")]
    once: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    if args.once.is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(log_filter.as_str())
            .init();
    } else {
        let data_dir = preview_proto::platform::data_dir();
        std::fs::create_dir_all(&data_dir)?;
        let log_path = data_dir.join("lpcard.log");
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_env_filter(log_filter.as_str())
            .with_ansi(false)
            .init();

        // Print log path to stderr so the operator can tail it immediately.
        eprintln!("lpcard log: {}", log_path.display());
    }

    tracing::info!("lpcard starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().unwrap_or_default(),
    };

    // ── Fetch controller ─────────────────────────────────────────────────────
    let client = HttpMetadataClient::new(&config.service)?;
    tracing::info!("metadata service: {}", client.base_url());
    let controller = Arc::new(FetchController::from_config(client, &config));

    if let Some(address) = args.once {
        if let Some(cycle) = controller.set_target_address(address).await {
            let outcome = cycle.await?;
            tracing::debug!("cycle finished: {:?}", outcome);
        }
        let state = controller.snapshot().await;
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    // ── HTTP server ──────────────────────────────────────────────────────────
    if config.http.enabled {
        http::start_server(
            config.http.bind_address.clone(),
            config.http.port,
            Arc::clone(&controller),
        );
    }

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let locale = config.ui.locale.parse::<Locale>().unwrap_or_else(|e| {
        tracing::warn!("{}; falling back to {}", e, Locale::default());
        Locale::default()
    });
    let catalog = Catalog::load(locale)?;
    let registry = registry::default_registry()?;

    let app = app::App::new(controller, &registry, catalog, args.address)?;
    app.run().await?;

    Ok(())
}
