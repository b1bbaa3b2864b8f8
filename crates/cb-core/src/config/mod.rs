//! # Configuration DTOs
//!
//! Pure data: TOML → DTO mapping with defaults for missing keys.
//! Values are accepted as facts; the bridge decides how to use them
//! (for example a zero poll frequency is clamped at the point of use).

use std::time::Duration;

use anyhow::Context;

use crate::permission::PermissionState;

/// Default read-poll interval in milliseconds.
pub const DEFAULT_UPDATE_FREQUENCY_MS: u64 = 1000;

/// Application configuration DTO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub bridge: BridgeConfig,
    pub permissions: PermissionPolicy,
}

/// Options recognized by the clipboard bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Read-poll interval.
    pub update_frequency: Duration,
}

impl BridgeConfig {
    pub fn with_update_frequency_ms(ms: u64) -> Self {
        Self {
            update_frequency: Duration::from_millis(ms),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::with_update_frequency_ms(DEFAULT_UPDATE_FREQUENCY_MS)
    }
}

/// Answers a policy-driven host gives to permission queries.
///
/// Desktop clipboards have no permission prompt of their own, so the
/// platform adapter answers from this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionPolicy {
    pub read: PermissionState,
    pub write: PermissionState,
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Missing sections or keys fall back to defaults. A permission value
    /// that is not `granted`, `prompt` or `denied` is an error.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let update_frequency_ms = toml_value
            .get("clipboard")
            .and_then(|c| c.get("update_frequency_ms"))
            .and_then(|v| v.as_integer())
            .map(|ms| ms.max(0) as u64)
            .unwrap_or(DEFAULT_UPDATE_FREQUENCY_MS);

        Ok(Self {
            bridge: BridgeConfig::with_update_frequency_ms(update_frequency_ms),
            permissions: PermissionPolicy {
                read: permission_entry(toml_value, "read")?,
                write: permission_entry(toml_value, "write")?,
            },
        })
    }
}

fn permission_entry(toml_value: &toml::Value, key: &str) -> anyhow::Result<PermissionState> {
    match toml_value
        .get("permissions")
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_str())
    {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid value for permissions.{key}")),
        None => Ok(PermissionState::default()),
    }
}
