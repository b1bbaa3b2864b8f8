//! Clipboard bridge
//!
//! Keeps one piece of state, the last known clipboard text, in sync with
//! the host clipboard and offers a permission-gated write.
//!
//! ## Lifecycle
//!
//! ```text
//! Inactive ──activate──▶ AwaitingPermission ──granted/prompt──▶ Polling
//!               │                 │
//!               │                 └──denied / query failed──▶ ReadBlocked
//!               └──host lacks a facility──▶ Unsupported
//!
//! any state ──deactivate──▶ Deactivated ──activate──▶ (as from Inactive)
//! ```
//!
//! Deactivation cancels the poll timer. Reads and writes already in flight
//! are not aborted; they complete against the host but their effect on the
//! bridge state is discarded. Writes started while `Deactivated` never touch
//! the state either. Activating an active bridge again restarts the poll
//! without affecting writes in flight.
//!
//! Every operation must be called from within a Tokio runtime.

mod lifecycle;
mod poll;
mod write;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, Instrument};

use crate::config::BridgeConfig;
use crate::error::ClipboardError;
use crate::ports::HostCapabilities;
use lifecycle::Lifecycle;

pub use write::WriteCallbacks;

/// Callback receiving read-side failures.
pub type ReadErrorHandler = Arc<dyn Fn(ClipboardError) + Send + Sync>;

/// Observable lifecycle state of a [`ClipboardBridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    /// Never activated.
    Inactive,
    /// Activated; the read permission query has not resolved yet.
    AwaitingPermission,
    /// The read-poll timer is running.
    Polling,
    /// Read permission was denied or could not be queried.
    ReadBlocked,
    /// The host lacks the permission or clipboard facility.
    Unsupported,
    /// Torn down by `deactivate`. The state keeps its last value and no
    /// longer changes until the bridge is activated again.
    Deactivated,
}

pub(crate) struct BridgeShared {
    host: HostCapabilities,
    config: BridgeConfig,
    on_read_error: ReadErrorHandler,
    text: watch::Sender<String>,
    lifecycle: Lifecycle,
}

impl BridgeShared {
    /// Overwrite the state unless the bridge was torn down since `generation`.
    fn apply_text(&self, generation: u64, text: String) -> bool {
        self.lifecycle
            .run_if_current(generation, || {
                self.text.send_replace(text);
            })
            .is_some()
    }

    /// Overwrite the state with written text unless the bridge was
    /// deactivated since the write started.
    fn apply_written(&self, ticket: Option<u64>, text: String) -> bool {
        self.lifecycle
            .run_if_writable(ticket, || {
                self.text.send_replace(text);
            })
            .is_some()
    }
}

/// Polls the host clipboard for text and writes to it, gated by permission checks.
///
/// 剪贴板桥接器：定时轮询宿主剪贴板并提供带权限检查的写入。
pub struct ClipboardBridge {
    shared: Arc<BridgeShared>,
}

impl ClipboardBridge {
    /// Bridge with the given options and no read error handler.
    pub fn new(host: HostCapabilities, config: BridgeConfig) -> Self {
        Self::builder(host).config(config).build()
    }

    pub fn builder(host: HostCapabilities) -> ClipboardBridgeBuilder {
        ClipboardBridgeBuilder {
            host,
            config: BridgeConfig::default(),
            on_read_error: None,
        }
    }

    /// Snapshot of the last known clipboard text.
    pub fn text(&self) -> String {
        self.shared.text.borrow().clone()
    }

    /// Receiver notified on every state assignment, including repeats of the same text.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.text.subscribe()
    }

    pub fn status(&self) -> BridgeStatus {
        self.shared.lifecycle.status()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.shared.config
    }

    pub fn is_supported(&self) -> bool {
        self.shared.host.is_supported()
    }

    /// Start watching the clipboard.
    ///
    /// Returns immediately. The returned handle resolves once the read
    /// permission has been answered and, when allowed, the poll timer is
    /// running. `None` means the host lacks a facility and nothing started.
    ///
    /// Activating an active bridge deactivates it first.
    pub fn activate(&self) -> Option<JoinHandle<()>> {
        let Some((permissions, clipboard)) = self.shared.host.facilities() else {
            self.shared.lifecycle.begin(BridgeStatus::Unsupported);
            debug!(host = ?self.shared.host, "clipboard host facility missing, polling disabled");
            return None;
        };

        let generation = self
            .shared
            .lifecycle
            .begin(BridgeStatus::AwaitingPermission);
        let shared = Arc::clone(&self.shared);
        let span = info_span!("bridge.activate", generation);

        Some(tokio::spawn(
            shared
                .start_read_poll(generation, permissions, clipboard)
                .instrument(span),
        ))
    }

    /// Stop watching the clipboard. Safe to call in any state, any number of times.
    pub fn deactivate(&self) {
        if self.shared.lifecycle.teardown() {
            info!("clipboard read poll stopped");
        }
    }

    /// Write `text` to the host clipboard.
    ///
    /// Returns immediately. On success the bridge state becomes `text`
    /// without waiting for the next poll, unless the bridge is or becomes
    /// deactivated first; the callbacks fire either way. `None` means the
    /// host lacks a facility; nothing is written and no callback fires.
    pub fn write(
        &self,
        text: impl Into<String>,
        callbacks: WriteCallbacks,
    ) -> Option<JoinHandle<()>> {
        let Some((permissions, clipboard)) = self.shared.host.facilities() else {
            debug!(host = ?self.shared.host, "clipboard host facility missing, write ignored");
            return None;
        };

        let text = text.into();
        let ticket = self.shared.lifecycle.write_ticket();
        let shared = Arc::clone(&self.shared);
        let span = info_span!("bridge.write", len = text.len());

        Some(tokio::spawn(
            shared
                .write_text(ticket, permissions, clipboard, text, callbacks)
                .instrument(span),
        ))
    }
}

impl Drop for ClipboardBridge {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl std::fmt::Debug for ClipboardBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardBridge")
            .field("host", &self.shared.host)
            .field("config", &self.shared.config)
            .field("status", &self.status())
            .finish()
    }
}

pub struct ClipboardBridgeBuilder {
    host: HostCapabilities,
    config: BridgeConfig,
    on_read_error: Option<ReadErrorHandler>,
}

impl ClipboardBridgeBuilder {
    pub fn config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn update_frequency(mut self, update_frequency: Duration) -> Self {
        self.config.update_frequency = update_frequency;
        self
    }

    /// Handler for failed reads and for a denied or failed read permission query.
    ///
    /// The handler runs while the bridge holds its lifecycle lock, so it is
    /// never called after a teardown. It must not call back into the bridge
    /// synchronously; spawn a task for that.
    pub fn on_read_error(mut self, f: impl Fn(ClipboardError) + Send + Sync + 'static) -> Self {
        self.on_read_error = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> ClipboardBridge {
        let (text, _) = watch::channel(String::new());
        let on_read_error = self.on_read_error.unwrap_or_else(|| Arc::new(|_| {}));

        ClipboardBridge {
            shared: Arc::new(BridgeShared {
                host: self.host,
                config: self.config,
                on_read_error,
                text,
                lifecycle: Lifecycle::new(),
            }),
        }
    }
}
