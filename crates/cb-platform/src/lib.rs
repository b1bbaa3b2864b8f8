//! # cb-platform
//!
//! Desktop host adapters for clipbridge.
//!
//! This crate implements the `cb-core` ports against the operating system:
//! the system clipboard through `arboard`, and permission answers from the
//! configured [`PermissionPolicy`].

pub mod capability;
pub mod clipboard;
pub mod permissions;

use std::sync::Arc;

use cb_core::config::PermissionPolicy;
use cb_core::ports::{ClipboardTextPort, HostCapabilities};

pub use capability::{detect_clipboard_capability, ClipboardCapability};
pub use clipboard::ArboardClipboard;
pub use permissions::StaticPermissions;

/// Assemble the host capability surface for this desktop session.
///
/// The permission facility is always present. The clipboard facility is
/// only exposed when [`detect_clipboard_capability`] finds one.
pub fn desktop_host(policy: PermissionPolicy) -> HostCapabilities {
    host_for(detect_clipboard_capability(), policy)
}

fn host_for(capability: ClipboardCapability, policy: PermissionPolicy) -> HostCapabilities {
    HostCapabilities {
        permissions: Some(Arc::new(StaticPermissions::new(policy))),
        clipboard: capability
            .is_available()
            .then(|| Arc::new(ArboardClipboard::new()) as Arc<dyn ClipboardTextPort>),
    }
}
