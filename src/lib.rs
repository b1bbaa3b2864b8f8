//! clipbridge
//!
//! Wires the clipboard bridge to the desktop host adapters and exposes the
//! `watch` and `copy` commands used by the binary.

pub mod bootstrap;
pub mod cli;

use std::io;

use anyhow::Result;
use cb_core::config::{AppConfig, BridgeConfig};
use cb_core::ClipboardBridge;
use tracing::{info, warn};

use cli::{Cli, Command};

/// Build a bridge over the desktop clipboard.
///
/// Read failures are logged here; the bridge itself never logs the errors
/// it hands to its callbacks.
pub fn build_bridge(config: &AppConfig) -> ClipboardBridge {
    ClipboardBridge::builder(cb_platform::desktop_host(config.permissions))
        .config(config.bridge)
        .on_read_error(|err| warn!(kind = err.kind(), "clipboard read failed: {err}"))
        .build()
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = bootstrap::config::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Watch(args) => {
            if let Some(ms) = args.update_frequency_ms {
                config.bridge = BridgeConfig::with_update_frequency_ms(ms);
            }
            let bridge = build_bridge(&config);
            let mut stdout = io::stdout();
            let seen = cli::watch::watch(
                &bridge,
                args.max_events,
                args.format,
                &mut stdout,
                shutdown_signal(),
            )
            .await?;
            info!(observations = seen, "watch finished");
        }
        Command::Copy(args) => {
            let bridge = build_bridge(&config);
            let copied = cli::copy::copy(&bridge, args.text).await?;
            println!("copied {} chars", copied.chars().count());
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl+C: {err}");
        std::future::pending::<()>().await;
    }
}
