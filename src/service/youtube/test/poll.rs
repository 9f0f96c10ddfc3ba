use super::*;

/// Tests that errors are caught at the poll boundary.
///
/// Expected: `Failed` outcome instead of an error, marker unchanged
#[tokio::test]
async fn poll_converts_errors_to_outcome() {
    let test = setup(configured("v1"), Some(item("v2")));
    test.notifier.fail_send.store(true, Ordering::SeqCst);

    let outcome = test.service.poll().await;

    assert!(matches!(outcome, TickOutcome::Failed { .. }));
    assert_eq!(test.store.snapshot().last_video_id, "v1");
}

/// Tests the non-reentrant guard.
///
/// Expected: a poll started while another holds the guard is skipped without touching
/// the feed
#[tokio::test]
async fn overlapping_poll_is_skipped() {
    let test = setup(configured("v1"), Some(item("v2")));

    let _running = test.service.poll_guard.lock().await;
    let outcome = test.service.poll().await;

    assert_eq!(outcome, TickOutcome::Skipped);
    assert_eq!(test.feed.fetches(), 0);
}

/// Tests that the guard is released after each poll.
///
/// Expected: consecutive polls both run
#[tokio::test]
async fn sequential_polls_both_run() {
    let test = setup(configured("v1"), Some(item("v2")));

    assert!(matches!(
        test.service.poll().await,
        TickOutcome::Notified { .. }
    ));
    assert_eq!(test.service.poll().await, TickOutcome::Unchanged);
    assert_eq!(test.feed.fetches(), 2);
}
