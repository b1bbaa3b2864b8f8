//! Port interfaces for the host platform
//!
//! Ports define the contract between the bridge and the host facilities it
//! adapts. The bridge never reaches for an ambient global; every host
//! capability is injected through [`HostCapabilities`] so it can be replaced
//! with a test double.

mod clipboard;
mod host;
mod permissions;


pub use clipboard::ClipboardTextPort;
pub use host::HostCapabilities;
pub use permissions::PermissionsPort;
