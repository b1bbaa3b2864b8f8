use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::BridgeShared;
use crate::error::ClipboardError;
use crate::permission::PermissionScope;
use crate::ports::{ClipboardTextPort, PermissionsPort};

type CopyCallback = Box<dyn FnOnce(String) + Send>;
type WriteErrorCallback = Box<dyn FnOnce(ClipboardError) + Send>;

/// Per-call callbacks for [`ClipboardBridge::write`](super::ClipboardBridge::write).
///
/// Both are optional; an unset callback silently drops its outcome.
///
/// ```no_run
/// # use cb_core::bridge::WriteCallbacks;
/// let callbacks = WriteCallbacks::new()
///     .on_copy(|text| println!("copied {} bytes", text.len()))
///     .on_error(|err| eprintln!("copy failed: {err}"));
/// ```
#[derive(Default)]
pub struct WriteCallbacks {
    on_copy: Option<CopyCallback>,
    on_error: Option<WriteErrorCallback>,
}

impl WriteCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the written text once the host write succeeded.
    pub fn on_copy(mut self, f: impl FnOnce(String) + Send + 'static) -> Self {
        self.on_copy = Some(Box::new(f));
        self
    }

    /// Called once if the permission is denied or a host operation fails.
    pub fn on_error(mut self, f: impl FnOnce(ClipboardError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    fn copied(self, text: String) {
        if let Some(on_copy) = self.on_copy {
            on_copy(text);
        }
    }

    fn failed(self, err: ClipboardError) {
        if let Some(on_error) = self.on_error {
            on_error(err);
        }
    }
}

impl fmt::Debug for WriteCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteCallbacks")
            .field("on_copy", &self.on_copy.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl BridgeShared {
    pub(crate) async fn write_text(
        self: Arc<Self>,
        ticket: Option<u64>,
        permissions: Arc<dyn PermissionsPort>,
        clipboard: Arc<dyn ClipboardTextPort>,
        text: String,
        callbacks: WriteCallbacks,
    ) {
        let state = match permissions.query(PermissionScope::ClipboardWrite).await {
            Ok(state) => state,
            Err(err) => return callbacks.failed(ClipboardError::Host(err)),
        };

        if !state.allows_access() {
            debug!(%state, "clipboard write permission not granted");
            return callbacks.failed(ClipboardError::permission_denied(
                PermissionScope::ClipboardWrite,
            ));
        }

        match clipboard.write_text(&text).await {
            Ok(()) => {
                if !self.apply_written(ticket, text.clone()) {
                    debug!("bridge deactivated, written text not applied to state");
                }
                callbacks.copied(text);
            }
            Err(err) => callbacks.failed(ClipboardError::Host(err)),
        }
    }
}
