//! `clipbridge watch`: activate the bridge and print what it observes.

use std::future::Future;
use std::io::Write;

use anyhow::{bail, Context, Result};
use cb_core::{BridgeStatus, ClipboardBridge};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::OutputFormat;

/// One state assignment seen by the watcher.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub seq: usize,
    pub observed_at: DateTime<Utc>,
    pub chars: usize,
    pub text: String,
}

impl Observation {
    fn new(seq: usize, text: String) -> Self {
        Self {
            seq,
            observed_at: Utc::now(),
            chars: text.chars().count(),
            text,
        }
    }
}

fn write_observation(
    out: &mut impl Write,
    observation: &Observation,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(
            out,
            "[{}] #{} ({} chars) {:?}",
            observation.observed_at.format("%Y-%m-%d %H:%M:%S%.3f"),
            observation.seq,
            observation.chars,
            observation.text
        )?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, observation)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Run the bridge until `shutdown` resolves, the bridge goes away, or
/// `max_events` observations were printed. Returns the observation count.
pub async fn watch<W, S>(
    bridge: &ClipboardBridge,
    max_events: Option<usize>,
    format: OutputFormat,
    out: &mut W,
    shutdown: S,
) -> Result<usize>
where
    W: Write,
    S: Future<Output = ()>,
{
    let mut rx = bridge.subscribe();

    bridge
        .activate()
        .context("clipboard is not available on this host")?
        .await
        .context("clipboard activation task failed")?;

    if bridge.status() != BridgeStatus::Polling {
        bail!("clipboard polling did not start (status: {:?})", bridge.status());
    }

    info!(
        interval_ms = bridge.config().update_frequency.as_millis() as u64,
        "watching clipboard"
    );

    tokio::pin!(shutdown);
    let mut seen = 0;

    while max_events.map_or(true, |limit| seen < limit) {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let text = rx.borrow_and_update().clone();
                seen += 1;
                write_observation(out, &Observation::new(seen, text), format)?;
            }
        }
    }

    bridge.deactivate();
    Ok(seen)
}
