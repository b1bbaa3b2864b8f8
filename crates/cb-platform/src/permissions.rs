use anyhow::Result;
use async_trait::async_trait;
use cb_core::config::PermissionPolicy;
use cb_core::permission::{PermissionScope, PermissionState};
use cb_core::ports::PermissionsPort;
use tracing::debug;

/// Permission facility answering from a configured policy.
///
/// Desktop clipboards have no permission prompt, so the answer for each
/// scope comes from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPermissions {
    policy: PermissionPolicy,
}

impl StaticPermissions {
    pub fn new(policy: PermissionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PermissionPolicy {
        self.policy
    }
}

#[async_trait]
impl PermissionsPort for StaticPermissions {
    async fn query(&self, scope: PermissionScope) -> Result<PermissionState> {
        let state = match scope {
            PermissionScope::ClipboardRead => self.policy.read,
            PermissionScope::ClipboardWrite => self.policy.write,
        };
        debug!(scope = scope.as_str(), %state, "permission query answered from policy");
        Ok(state)
    }
}
