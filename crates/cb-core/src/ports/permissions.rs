use anyhow::Result;
use async_trait::async_trait;

use crate::permission::{PermissionScope, PermissionState};

/// Host permission query facility.
///
/// Queried fresh before every read-poll setup and every write; answers
/// are never cached by the caller.
#[async_trait]
pub trait PermissionsPort: Send + Sync {
    async fn query(&self, scope: PermissionScope) -> Result<PermissionState>;
}
