//! Integration tests for overlay auto-close on a paused tokio clock

use pageedit::events::StoreEvent;
use pageedit::overlay::{OverlayOptions, OverlayUpdate, TokioScheduler};
use pageedit::session::MemorySessionStorage;
use pageedit::PageEditStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn tokio_store() -> PageEditStore {
    PageEditStore::new(
        Arc::new(MemorySessionStorage::new()),
        Arc::new(TokioScheduler::current()),
    )
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = count.clone();
    (count, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn test_timeout_hides_and_calls_on_close_once() {
    let store = tokio_store();
    let (closed, on_close) = counter();
    store
        .overlay()
        .show(
            OverlayOptions::new()
                .message("Publishing")
                .timeout_secs(1)
                .on_close(on_close),
        )
        .unwrap();
    assert!(store.overlay().is_active());
    assert_eq!(store.overlay().snapshot().max_timeout_in_seconds, Some(1.0));

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(!store.overlay().is_active());
    assert_eq!(closed.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_second_show_cancels_first_timer() {
    let store = tokio_store();
    let (first_closed, first) = counter();
    let (second_closed, second) = counter();

    store
        .overlay()
        .show(OverlayOptions::new().timeout_secs(1).on_close(first))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    store
        .overlay()
        .show(OverlayOptions::new().timeout_secs(2).on_close(second))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(store.overlay().is_active());
    assert_eq!(first_closed.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(!store.overlay().is_active());
    assert_eq!(first_closed.load(Ordering::SeqCst), 0);
    assert_eq!(second_closed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_button_hide_runs_on_close_once() {
    let store = tokio_store();
    let (closed, on_close) = counter();
    store
        .overlay()
        .show(
            OverlayOptions::new()
                .close_button(true)
                .timeout_secs(3)
                .on_close(on_close),
        )
        .unwrap();
    assert!(store.overlay().snapshot().has_close_button);

    store.overlay().hide();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert!(!store.overlay().has_pending_timer());

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_update_keeps_timer() {
    let store = tokio_store();
    store
        .overlay()
        .show(OverlayOptions::new().message("Saving").timeout_secs(1))
        .unwrap();
    assert!(store.overlay().update(OverlayUpdate {
        message: Some("Almost done".to_string()),
        has_spinner: Some(false),
        ..OverlayUpdate::default()
    }));
    let snapshot = store.overlay().snapshot();
    assert_eq!(snapshot.message, "Almost done");
    assert!(!snapshot.has_spinner);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(!store.overlay().is_active());
}

#[tokio::test(start_paused = true)]
async fn test_overlay_events() {
    let store = tokio_store();
    let events = store.subscribe();
    store
        .overlay()
        .show(OverlayOptions::new().timeout_secs(1))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let received: Vec<StoreEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            StoreEvent::OverlayChanged { is_active: true },
            StoreEvent::OverlayChanged { is_active: false },
        ]
    );
}
