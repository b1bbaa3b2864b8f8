//! Time-driven behavior of the clipboard bridge, run on a paused Tokio clock.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cb_core::{BridgeStatus, ClipboardBridge, PermissionScope, PermissionState, WriteCallbacks};
use common::{host, ErrorLog, FixedPermissions, ScriptedClipboard};
use tokio::time::{sleep_until, Instant};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn assert_elapsed(start: Instant, expected_ms: u64) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= ms(expected_ms) && elapsed < ms(expected_ms + 10),
        "expected ~{expected_ms}ms, got {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn polls_hello_then_world_at_each_interval() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new().then_text("hello").then_text("world"));
    let bridge = ClipboardBridge::builder(host(&permissions, &clipboard))
        .update_frequency(ms(1000))
        .build();
    let start = Instant::now();

    bridge.activate().unwrap().await.unwrap();
    let mut rx = bridge.subscribe();

    assert_eq!(bridge.status(), BridgeStatus::Polling);
    assert_eq!(bridge.text(), "");

    rx.changed().await.unwrap();
    assert_elapsed(start, 1000);
    assert_eq!(bridge.text(), "hello");

    rx.changed().await.unwrap();
    assert_elapsed(start, 2000);
    assert_eq!(bridge.text(), "world");

    assert_eq!(permissions.queries(), vec![PermissionScope::ClipboardRead]);
}

#[tokio::test(start_paused = true)]
async fn failed_read_keeps_state_and_polling_continues() {
    let permissions = Arc::new(FixedPermissions::new(
        PermissionState::Prompt,
        PermissionState::Granted,
    ));
    let clipboard = Arc::new(
        ScriptedClipboard::new()
            .then_text("a")
            .then_error("clipboard busy")
            .then_text("b"),
    );
    let errors = ErrorLog::default();
    let bridge = ClipboardBridge::builder(host(&permissions, &clipboard))
        .on_read_error(errors.sink())
        .build();
    let start = Instant::now();

    bridge.activate().unwrap().await.unwrap();

    sleep_until(start + ms(2100)).await;
    assert_eq!(bridge.text(), "a");
    assert_eq!(errors.messages(), vec!["clipboard busy".to_string()]);
    assert_eq!(bridge.status(), BridgeStatus::Polling);

    sleep_until(start + ms(3100)).await;
    assert_eq!(bridge.text(), "b");
    assert_eq!(clipboard.read_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn repeated_text_still_notifies_subscribers() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new().then_text("same").then_text("same"));
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());

    bridge.activate().unwrap().await.unwrap();
    let mut rx = bridge.subscribe();

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), "same");
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), "same");
}

#[tokio::test(start_paused = true)]
async fn write_updates_state_without_waiting_for_poll() {
    let permissions = Arc::new(FixedPermissions::new(
        PermissionState::Granted,
        PermissionState::Prompt,
    ));
    let clipboard = Arc::new(ScriptedClipboard::new());
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());
    let start = Instant::now();

    bridge.activate().unwrap().await.unwrap();
    bridge
        .write("foo", WriteCallbacks::new())
        .unwrap()
        .await
        .unwrap();

    assert_elapsed(start, 0);
    assert_eq!(bridge.text(), "foo");
    assert_eq!(clipboard.writes(), vec!["foo".to_string()]);

    // The next poll reads the host content back.
    sleep_until(start + ms(1100)).await;
    assert_eq!(bridge.text(), "foo");
    assert_eq!(clipboard.read_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn deactivate_stops_further_reads() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new().then_text("first"));
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());

    bridge.activate().unwrap().await.unwrap();
    let mut rx = bridge.subscribe();
    rx.changed().await.unwrap();

    bridge.deactivate();
    bridge.deactivate();

    tokio::time::sleep(ms(5000)).await;
    assert_eq!(bridge.status(), BridgeStatus::Deactivated);
    assert_eq!(clipboard.read_calls(), 1);
    assert_eq!(bridge.text(), "first");
}

#[tokio::test(start_paused = true)]
async fn in_flight_read_is_discarded_after_deactivate() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new().then_text_after(ms(500), "late"));
    let errors = ErrorLog::default();
    let bridge = ClipboardBridge::builder(host(&permissions, &clipboard))
        .on_read_error(errors.sink())
        .build();
    let start = Instant::now();

    bridge.activate().unwrap().await.unwrap();

    sleep_until(start + ms(1200)).await;
    assert_eq!(clipboard.read_calls(), 1);
    bridge.deactivate();

    sleep_until(start + ms(3000)).await;
    assert_eq!(bridge.text(), "");
    assert!(errors.messages().is_empty());
    assert_eq!(clipboard.read_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn in_flight_read_error_is_not_reported_after_deactivate() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new().then_error_after(ms(500), "too late"));
    let errors = ErrorLog::default();
    let bridge = ClipboardBridge::builder(host(&permissions, &clipboard))
        .on_read_error(errors.sink())
        .build();
    let start = Instant::now();

    bridge.activate().unwrap().await.unwrap();

    sleep_until(start + ms(1200)).await;
    bridge.deactivate();

    sleep_until(start + ms(2000)).await;
    assert_eq!(clipboard.read_calls(), 1);
    assert!(errors.messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn overlapping_reads_last_completed_wins() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(
        ScriptedClipboard::new()
            .then_text_after(ms(1500), "slow")
            .then_text_after(ms(100), "fast"),
    );
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());
    let start = Instant::now();

    bridge.activate().unwrap().await.unwrap();

    // Read #1 issued at 1000ms completes at 2500ms; read #2 issued at 2000ms completes at 2100ms.
    sleep_until(start + ms(2200)).await;
    assert_eq!(bridge.text(), "fast");

    sleep_until(start + ms(2600)).await;
    assert_eq!(bridge.text(), "slow");
}

#[tokio::test(start_paused = true)]
async fn activating_twice_keeps_a_single_poll() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new());
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());
    let start = Instant::now();

    bridge.activate().unwrap().await.unwrap();
    bridge.activate().unwrap().await.unwrap();

    sleep_until(start + ms(1500)).await;
    assert_eq!(clipboard.read_calls(), 1);
    assert_eq!(
        permissions.queries(),
        vec![PermissionScope::ClipboardRead, PermissionScope::ClipboardRead]
    );
}

#[tokio::test(start_paused = true)]
async fn dropping_the_bridge_cancels_polling() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new());
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());

    bridge.activate().unwrap().await.unwrap();
    drop(bridge);

    tokio::time::sleep(ms(3000)).await;
    assert_eq!(clipboard.read_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn deactivate_while_permission_pending_never_polls() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new());
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());

    let activation = bridge.activate().unwrap();
    assert_eq!(bridge.status(), BridgeStatus::AwaitingPermission);
    bridge.deactivate();
    activation.await.unwrap();

    tokio::time::sleep(ms(3000)).await;
    assert_eq!(bridge.status(), BridgeStatus::Deactivated);
    assert_eq!(clipboard.read_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn write_after_deactivate_leaves_state_untouched() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new());
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());
    let copied = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&copied);

    bridge.activate().unwrap().await.unwrap();
    bridge.deactivate();
    bridge
        .write(
            "after-teardown",
            WriteCallbacks::new().on_copy(move |text| *sink.lock().unwrap() = Some(text)),
        )
        .unwrap()
        .await
        .unwrap();

    assert_eq!(bridge.text(), "");
    assert_eq!(bridge.status(), BridgeStatus::Deactivated);
    assert_eq!(clipboard.writes(), vec!["after-teardown".to_string()]);
    assert_eq!(copied.lock().unwrap().as_deref(), Some("after-teardown"));
}

#[tokio::test(start_paused = true)]
async fn write_in_flight_when_deactivated_leaves_state_untouched() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new().with_write_delay(ms(200)));
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());

    bridge.activate().unwrap().await.unwrap();
    let write = bridge.write("foo", WriteCallbacks::new()).unwrap();
    tokio::time::sleep(ms(100)).await;
    bridge.deactivate();
    write.await.unwrap();

    assert_eq!(bridge.text(), "");
    assert_eq!(clipboard.writes(), vec!["foo".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn write_in_flight_survives_reactivation() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new().with_write_delay(ms(200)));
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());
    let copied = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&copied);

    bridge.activate().unwrap().await.unwrap();
    let write = bridge
        .write(
            "foo",
            WriteCallbacks::new().on_copy(move |text| *sink.lock().unwrap() = Some(text)),
        )
        .unwrap();
    tokio::time::sleep(ms(100)).await;
    bridge.activate().unwrap().await.unwrap();
    write.await.unwrap();

    assert_eq!(bridge.text(), "foo");
    assert_eq!(bridge.status(), BridgeStatus::Polling);
    assert_eq!(copied.lock().unwrap().as_deref(), Some("foo"));
}

#[tokio::test(start_paused = true)]
async fn reactivating_after_deactivate_reenables_writes() {
    let permissions = Arc::new(FixedPermissions::granted());
    let clipboard = Arc::new(ScriptedClipboard::new());
    let bridge = ClipboardBridge::new(host(&permissions, &clipboard), Default::default());

    bridge.activate().unwrap().await.unwrap();
    bridge.deactivate();
    bridge.activate().unwrap().await.unwrap();
    bridge
        .write("again", WriteCallbacks::new())
        .unwrap()
        .await
        .unwrap();

    assert_eq!(bridge.status(), BridgeStatus::Polling);
    assert_eq!(bridge.text(), "again");
}
