use anyhow::{Context, Result};
use async_trait::async_trait;
use cb_core::ports::ClipboardTextPort;
use tokio::task::spawn_blocking;

/// System clipboard adapter backed by `arboard`.
///
/// Clipboard calls block on the platform's selection or pasteboard APIs, so
/// each one runs on the blocking pool with its own short-lived handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardTextPort for ArboardClipboard {
    async fn read_text(&self) -> Result<String> {
        spawn_blocking(|| -> Result<String> {
            let mut clipboard =
                arboard::Clipboard::new().context("failed to open system clipboard")?;
            clipboard
                .get_text()
                .context("failed to read text from system clipboard")
        })
        .await
        .context("clipboard read task failed")?
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_owned();
        spawn_blocking(move || -> Result<()> {
            let mut clipboard =
                arboard::Clipboard::new().context("failed to open system clipboard")?;
            clipboard
                .set_text(text)
                .context("failed to write text to system clipboard")
        })
        .await
        .context("clipboard write task failed")?
    }
}
