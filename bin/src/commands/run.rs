//! The `run` command: poll until stopped.

use anyhow::{Context, Result};
use hlbars_lib::prelude::*;
use std::path::Path;
use tokio::signal;
use tracing::{error, info};

use crate::RunArgs;

/// Applies command-line overrides on top of the file configuration.
pub(crate) fn resolve_config(config_path: &Path, args: RunArgs) -> CollectorConfig {
    let mut config = CollectorConfig::load(config_path);

    if let Some(coin) = args.coin {
        config.coin = coin;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(db_path) = args.db_path {
        config.db_path = db_path;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.interval_pull_ms = interval_ms;
    }

    config
}

pub(crate) async fn run(config_path: &Path, args: RunArgs) -> Result<()> {
    let config = resolve_config(config_path, args);

    let source = HyperliquidSource::with_config(
        ClientConfig::default().with_base_url(config.base_url.clone()),
        config.coin.clone(),
    )
    .context("Failed to build HTTP client")?;

    let store = SqliteBarStore::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
    let existing = store.count().context("Failed to count stored bars")?;
    let last = store.latest().context("Failed to read the latest bar")?;

    info!(
        coin = %config.coin,
        db = %config.db_path.display(),
        rows = existing,
        last = %last.as_ref().map_or_else(|| "-".to_string(), Ohlcv::bucket_key),
        interval_ms = config.interval_pull_ms,
        "collecting 1s bars, press Ctrl+C to stop"
    );

    let collector = Collector::new(source, store, config.poll_settings());
    collector.run(shutdown_signal()).await;

    Ok(())
}

/// Completes on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
