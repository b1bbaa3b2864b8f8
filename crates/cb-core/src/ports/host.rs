use std::sync::Arc;

use super::{ClipboardTextPort, PermissionsPort};

/// The capability surface a host exposes to the bridge.
///
/// Each facility is optional: `None` means the host does not provide it.
/// The bridge only does anything when both are present.
///
/// 宿主暴露的能力集合；缺少任意一项时桥接器不执行任何操作。
#[derive(Clone, Default)]
pub struct HostCapabilities {
    pub permissions: Option<Arc<dyn PermissionsPort>>,
    pub clipboard: Option<Arc<dyn ClipboardTextPort>>,
}

impl HostCapabilities {
    pub fn new(
        permissions: Arc<dyn PermissionsPort>,
        clipboard: Arc<dyn ClipboardTextPort>,
    ) -> Self {
        Self {
            permissions: Some(permissions),
            clipboard: Some(clipboard),
        }
    }

    /// A host exposing neither facility.
    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn is_supported(&self) -> bool {
        self.permissions.is_some() && self.clipboard.is_some()
    }

    /// Both facilities, when the host exposes both.
    pub(crate) fn facilities(
        &self,
    ) -> Option<(Arc<dyn PermissionsPort>, Arc<dyn ClipboardTextPort>)> {
        match (&self.permissions, &self.clipboard) {
            (Some(permissions), Some(clipboard)) => {
                Some((Arc::clone(permissions), Arc::clone(clipboard)))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("permissions", &self.permissions.is_some())
            .field("clipboard", &self.clipboard.is_some())
            .finish()
    }
}
