pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod domain;
pub mod models;
pub mod quality;
pub mod services;

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
pub use cli::{Cli, Commands};
use clients::WatcherClient;
pub use config::Config;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let directives = log_directives(
        cli.debug,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        &config.general.log_level,
    );
    let env_filter = EnvFilter::new(directives);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Some(Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
        Some(Commands::Serve) | None => run_server(config).await,
    }
}

/// `--debug` wins over `RUST_LOG`, which wins over the configured level.
fn log_directives(debug: bool, rust_log: Option<String>, configured: &str) -> String {
    if debug {
        return "debug".to_string();
    }

    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    info!("Watcharr v{} starting...", env!("CARGO_PKG_VERSION"));

    let (client, watcher_config) = WatcherClient::connect(&config.watcher3)
        .await
        .with_context(|| {
            format!(
                "Could not get Watcher3 configuration from {}",
                config.watcher3.host_url()
            )
        })?;

    debug!("Watcher3 root folder: {}", watcher_config.root_folder());

    let state = api::create_app_state(Arc::new(client), watcher_config, &config);
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.ip, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    signal_readiness(config.server.ready_fd);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

/// Writes a newline to `ready_fd` so a supervisor knows the listener is up.
fn signal_readiness(ready_fd: Option<i32>) {
    let Some(fd) = ready_fd else {
        info!("Initialization done.");
        return;
    };

    info!("Initialization done. Signalling readiness.");
    debug!("Readiness signal writes to file descriptor {}", fd);

    let result = OpenOptions::new()
        .write(true)
        .open(format!("/dev/fd/{fd}"))
        .and_then(|mut file| file.write_all(b"\n"));

    if let Err(e) = result {
        warn!("Could not signal file descriptor '{}': {}", fd, e);
    }
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
