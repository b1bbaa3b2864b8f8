//! Clipboard permission model.
//!
//! Read and write access are independent scopes. A host answers each query
//! with one of three states; `Granted` and `Prompt` both allow the operation
//! to proceed (a prompting host asks the user itself).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named permission a host may grant, deny, or prompt for.
///
/// 剪贴板权限作用域（读与写相互独立）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionScope {
    ClipboardRead,
    ClipboardWrite,
}

impl PermissionScope {
    /// Scope name as passed to a host permission query.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClipboardRead => "clipboard-read",
            Self::ClipboardWrite => "clipboard-write",
        }
    }
}

impl fmt::Display for PermissionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClipboardRead => f.write_str("ClipboardRead"),
            Self::ClipboardWrite => f.write_str("ClipboardWrite"),
        }
    }
}

/// Answer to a permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Granted,
    Prompt,
    Denied,
}

impl PermissionState {
    /// Whether the guarded clipboard operation may be attempted.
    pub fn allows_access(&self) -> bool {
        matches!(self, Self::Granted | Self::Prompt)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Prompt => "prompt",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid permission state '{0}' (expected granted, prompt or denied)")]
pub struct ParsePermissionStateError(pub String);

impl FromStr for PermissionState {
    type Err = ParsePermissionStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Ok(Self::Granted),
            "prompt" => Ok(Self::Prompt),
            "denied" => Ok(Self::Denied),
            _ => Err(ParsePermissionStateError(s.to_string())),
        }
    }
}
