//! # cb-core
//!
//! Core types for clipbridge: the permission model, host ports, the
//! configuration DTO and the [`ClipboardBridge`] itself.
//!
//! This crate has no platform dependencies; host facilities are injected
//! through [`ports::HostCapabilities`].

pub mod bridge;
pub mod config;
pub mod error;
pub mod permission;
pub mod ports;

// Re-export commonly used types at the crate root
pub use bridge::{BridgeStatus, ClipboardBridge, ClipboardBridgeBuilder, WriteCallbacks};
pub use config::{AppConfig, BridgeConfig, PermissionPolicy};
pub use error::ClipboardError;
pub use permission::{PermissionScope, PermissionState};
pub use ports::{ClipboardTextPort, HostCapabilities, PermissionsPort};
