//! Scripted host doubles shared by the bridge integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use cb_core::{
    ClipboardError, ClipboardTextPort, HostCapabilities, PermissionScope, PermissionState,
    PermissionsPort,
};

/// Permission facility answering with fixed states and recording every query.
pub struct FixedPermissions {
    read: PermissionState,
    write: PermissionState,
    queries: Mutex<Vec<PermissionScope>>,
}

impl FixedPermissions {
    pub fn new(read: PermissionState, write: PermissionState) -> Self {
        Self {
            read,
            write,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn granted() -> Self {
        Self::new(PermissionState::Granted, PermissionState::Granted)
    }

    pub fn queries(&self) -> Vec<PermissionScope> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PermissionsPort for FixedPermissions {
    async fn query(&self, scope: PermissionScope) -> Result<PermissionState> {
        self.queries.lock().unwrap().push(scope);
        Ok(match scope {
            PermissionScope::ClipboardRead => self.read,
            PermissionScope::ClipboardWrite => self.write,
        })
    }
}

struct ScriptedRead {
    delay: Duration,
    outcome: Result<String, String>,
}

/// Clipboard double that plays back scripted reads, then falls back to
/// whatever was last written.
#[derive(Default)]
pub struct ScriptedClipboard {
    script: Mutex<VecDeque<ScriptedRead>>,
    content: Mutex<String>,
    read_calls: AtomicUsize,
    writes: Mutex<Vec<String>>,
    write_delay: Duration,
}

impl ScriptedClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_text(self, text: &str) -> Self {
        self.then_text_after(Duration::ZERO, text)
    }

    pub fn then_text_after(self, delay: Duration, text: &str) -> Self {
        self.push(delay, Ok(text.to_string()))
    }

    /// Every host write takes `delay` to complete.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn then_error(self, message: &str) -> Self {
        self.then_error_after(Duration::ZERO, message)
    }

    pub fn then_error_after(self, delay: Duration, message: &str) -> Self {
        self.push(delay, Err(message.to_string()))
    }

    fn push(self, delay: Duration, outcome: Result<String, String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedRead { delay, outcome });
        self
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardTextPort for ScriptedClipboard {
    async fn read_text(&self) -> Result<String> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.outcome.map_err(|message| anyhow!(message))
            }
            None => Ok(self.content.lock().unwrap().clone()),
        }
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }
        *self.content.lock().unwrap() = text.to_string();
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn host(
    permissions: &Arc<FixedPermissions>,
    clipboard: &Arc<ScriptedClipboard>,
) -> HostCapabilities {
    HostCapabilities::new(permissions.clone(), clipboard.clone())
}

/// Collects error messages handed to a callback.
#[derive(Clone, Default)]
pub struct ErrorLog(Arc<Mutex<Vec<String>>>);

impl ErrorLog {
    pub fn sink(&self) -> impl Fn(ClipboardError) + Send + Sync + 'static {
        let log = Arc::clone(&self.0);
        move |err: ClipboardError| log.lock().unwrap().push(err.to_string())
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
