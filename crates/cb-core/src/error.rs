use thiserror::Error;

use crate::permission::PermissionScope;

/// Error delivered to the bridge's read and write callbacks.
///
/// 通过回调交付给调用方的剪贴板错误。
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The host answered `denied` for the scope.
    #[error("{scope} permission has been blocked as the user.")]
    PermissionDenied { scope: PermissionScope },

    /// A host query, read or write failed; the source is passed through untouched.
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

impl ClipboardError {
    pub fn permission_denied(scope: PermissionScope) -> Self {
        Self::PermissionDenied { scope }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "permission-denied",
            Self::Host(_) => "host-operation",
        }
    }

    /// Scope of a synthesized permission error; host errors carry none.
    pub fn scope(&self) -> Option<PermissionScope> {
        match self {
            Self::PermissionDenied { scope } => Some(*scope),
            Self::Host(_) => None,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
