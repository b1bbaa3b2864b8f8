//! Read side of the bridge: permission check, then a fixed-interval poll.
//!
//! Every tick spawns its read as an independent task, so a slow host read
//! does not hold back the next tick. Reads may therefore complete out of
//! order; whichever completes last wins.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::{BridgeShared, BridgeStatus};
use crate::error::ClipboardError;
use crate::permission::PermissionScope;
use crate::ports::{ClipboardTextPort, PermissionsPort};

/// A zero frequency is clamped to this period.
pub(crate) const MIN_POLL_PERIOD: Duration = Duration::from_millis(1);

/// Longer frequencies are clamped to this period so timer deadlines stay
/// representable as an `Instant`.
pub(crate) const MAX_POLL_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

impl BridgeShared {
    pub(crate) fn poll_period(&self) -> Duration {
        self.config
            .update_frequency
            .clamp(MIN_POLL_PERIOD, MAX_POLL_PERIOD)
    }

    pub(crate) async fn start_read_poll(
        self: Arc<Self>,
        generation: u64,
        permissions: Arc<dyn PermissionsPort>,
        clipboard: Arc<dyn ClipboardTextPort>,
    ) {
        let state = match permissions.query(PermissionScope::ClipboardRead).await {
            Ok(state) => state,
            Err(err) => {
                self.lifecycle.settle(generation, BridgeStatus::ReadBlocked, || {
                    (self.on_read_error)(ClipboardError::Host(err))
                });
                return;
            }
        };

        if !state.allows_access() {
            debug!(%state, "clipboard read permission not granted, polling disabled");
            self.lifecycle.settle(generation, BridgeStatus::ReadBlocked, || {
                (self.on_read_error)(ClipboardError::permission_denied(
                    PermissionScope::ClipboardRead,
                ))
            });
            return;
        }

        let period = self.poll_period();
        let shared = Arc::clone(&self);
        let started = self.lifecycle.start_polling(generation, move || {
            tokio::spawn(shared.poll_loop(generation, clipboard, period)).abort_handle()
        });

        if started {
            info!(
                %state,
                period_ms = period.as_millis() as u64,
                "clipboard read poll started"
            );
        }
    }

    async fn poll_loop(
        self: Arc<Self>,
        generation: u64,
        clipboard: Arc<dyn ClipboardTextPort>,
        period: Duration,
    ) {
        // First read happens one full period after start.
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let shared = Arc::clone(&self);
            let clipboard = Arc::clone(&clipboard);
            tokio::spawn(async move {
                match clipboard.read_text().await {
                    Ok(text) => {
                        shared.apply_text(generation, text);
                    }
                    Err(err) => shared.report_read_error(generation, ClipboardError::Host(err)),
                }
            });
        }
    }

    fn report_read_error(&self, generation: u64, err: ClipboardError) {
        self.lifecycle
            .run_if_current(generation, || (self.on_read_error)(err));
    }
}
