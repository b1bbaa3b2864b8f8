//! Platform capability detection for the system clipboard.
//!
//! Detects whether the current session can reach a clipboard at all.

/// Whether the system clipboard is reachable from this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardCapability {
    /// A clipboard service is reachable (macOS pasteboard, Windows clipboard, X11/Wayland)
    Available,
    /// No clipboard can be reached (headless Linux, unsupported platforms)
    Unavailable,
}

impl ClipboardCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Detect the clipboard capability of the current platform.
///
/// # Detection Logic
///
/// - **macOS**: Always `Available`
/// - **Windows**: Always `Available`
/// - **Linux**: `Available` when an X11 or Wayland display is reachable
///   (`DISPLAY` or `WAYLAND_DISPLAY` set), otherwise `Unavailable`
/// - **Other**: `Unavailable`
pub fn detect_clipboard_capability() -> ClipboardCapability {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        ClipboardCapability::Available
    }

    #[cfg(target_os = "linux")]
    {
        if has_display_server() {
            tracing::debug!("display server detected, system clipboard available");
            ClipboardCapability::Available
        } else {
            tracing::warn!("no display server detected, system clipboard unavailable");
            ClipboardCapability::Unavailable
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        tracing::warn!("unsupported platform for system clipboard access");
        ClipboardCapability::Unavailable
    }
}

/// A Linux session can reach a clipboard when either display server is
/// advertised. An empty variable counts as absent.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn has_display_server() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| std::env::var(key).map_or(false, |value| !value.is_empty()))
}
