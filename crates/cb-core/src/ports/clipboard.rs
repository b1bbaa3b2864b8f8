use anyhow::Result;
use async_trait::async_trait;

/// Plain-text access to the host clipboard.
///
/// 宿主剪贴板的纯文本读写端口。
#[async_trait]
pub trait ClipboardTextPort: Send + Sync {
    /// Resolve with the current clipboard text.
    async fn read_text(&self) -> Result<String>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<()>;
}
