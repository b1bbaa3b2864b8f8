//! `clipbridge copy`: write text through the bridge and wait for the outcome.

use anyhow::{anyhow, Context, Result};
use cb_core::{ClipboardBridge, ClipboardError, WriteCallbacks};
use tokio::sync::mpsc;

/// Write `text` and resolve with what the copy callback received.
///
/// The error callback's [`ClipboardError`] becomes the returned error.
pub async fn copy(bridge: &ClipboardBridge, text: String) -> Result<String> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, ClipboardError>>();
    let copied_tx = tx.clone();
    let callbacks = WriteCallbacks::new()
        .on_copy(move |text| {
            let _ = copied_tx.send(Ok(text));
        })
        .on_error(move |err| {
            let _ = tx.send(Err(err));
        });

    bridge
        .write(text, callbacks)
        .context("clipboard is not available on this host")?
        .await
        .context("clipboard write task failed")?;

    match rx.recv().await {
        Some(Ok(text)) => Ok(text),
        Some(Err(err)) => Err(anyhow::Error::new(err).context("clipboard write failed")),
        None => Err(anyhow!("clipboard write finished without reporting an outcome")),
    }
}
