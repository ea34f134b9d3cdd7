// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ap_core::FakeClock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Debug, PartialEq)]
enum TestError {
    Timeout,
    Failed,
}

impl TripsBreaker for TestError {
    fn trips_breaker(&self) -> bool {
        matches!(self, TestError::Timeout)
    }
}

fn breaker() -> (CircuitBreaker<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    (CircuitBreaker::new("aerospace", COOLDOWN, clock.clone()), clock)
}

async fn timeout(b: &CircuitBreaker<FakeClock>) -> Result<(), BreakerError<TestError>> {
    b.call(|| async { Err::<(), _>(TestError::Timeout) }).await
}

async fn succeed(b: &CircuitBreaker<FakeClock>) -> Result<u32, BreakerError<TestError>> {
    b.call(|| async { Ok::<_, TestError>(7) }).await
}

#[tokio::test]
async fn closed_breaker_passes_results_through() {
    let (b, _) = breaker();
    assert_eq!(succeed(&b).await.unwrap(), 7);
    let err = b
        .call(|| async { Err::<(), _>(TestError::Failed) })
        .await
        .unwrap_err();
    assert!(matches!(err, BreakerError::Inner(TestError::Failed)));
    assert!(!b.is_open(), "non-timeout failures must not trip");
}

#[tokio::test]
async fn single_timeout_opens_and_fails_fast() {
    let (b, clock) = breaker();
    let err = timeout(&b).await.unwrap_err();
    assert!(matches!(err, BreakerError::Inner(TestError::Timeout)));

    let invoked = AtomicUsize::new(0);
    clock.advance(Duration::from_secs(10));
    let err = b
        .call(|| async {
            invoked.fetch_add(1, Ordering::SeqCst);
            Ok::<_, TestError>(())
        })
        .await
        .unwrap_err();

    match err {
        BreakerError::Open { remaining, name } => {
            assert_eq!(name, "aerospace");
            assert_eq!(remaining, Duration::from_secs(20));
        }
        other => panic!("expected open, got {other:?}"),
    }
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn closes_exactly_at_cooldown() {
    let (b, clock) = breaker();
    let _ = timeout(&b).await;

    clock.advance(COOLDOWN - Duration::from_millis(1));
    assert!(matches!(succeed(&b).await, Err(BreakerError::Open { .. })));

    clock.advance(Duration::from_millis(1));
    assert_eq!(succeed(&b).await.unwrap(), 7);
    assert!(!b.is_open());
}

#[tokio::test]
async fn rejected_calls_do_not_extend_cooldown() {
    let (b, clock) = breaker();
    let _ = timeout(&b).await;
    for _ in 0..5 {
        clock.advance(Duration::from_secs(5));
        let _ = succeed(&b).await;
    }
    clock.advance(Duration::from_secs(5));
    assert!(succeed(&b).await.is_ok());
}

#[tokio::test]
async fn status_reports_failures_and_remaining() {
    let (b, clock) = breaker();
    let _ = timeout(&b).await;
    clock.advance(Duration::from_secs(12));

    let status = b.status();
    assert!(status.is_open);
    assert_eq!(status.failure_count, 1);
    assert_eq!(status.cooldown_remaining_ms, Some(18_000));

    clock.advance(COOLDOWN);
    let status = b.status();
    assert!(!status.is_open);
    assert_eq!(status.cooldown_remaining_ms, None);

    succeed(&b).await.unwrap();
    assert_eq!(b.status().failure_count, 0);
}

#[tokio::test]
async fn queued_caller_observes_trip_of_call_ahead() {
    let (b, _) = breaker();
    let b = Arc::new(b);
    let (started_tx, started_rx) = tokio::sync::oneshot::channel();
    let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

    let first = {
        let b = Arc::clone(&b);
        tokio::spawn(async move {
            b.call(|| async move {
                let _ = started_tx.send(());
                let _ = release_rx.await;
                Err::<(), _>(TestError::Timeout)
            })
            .await
        })
    };
    started_rx.await.unwrap();

    let invoked = Arc::new(AtomicUsize::new(0));
    let second = {
        let b = Arc::clone(&b);
        let invoked = Arc::clone(&invoked);
        tokio::spawn(async move {
            b.call(|| async move {
                invoked.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TestError>(())
            })
            .await
        })
    };
    tokio::task::yield_now().await;
    release_tx.send(()).unwrap();

    assert!(matches!(
        first.await.unwrap(),
        Err(BreakerError::Inner(TestError::Timeout))
    ));
    assert!(matches!(
        second.await.unwrap(),
        Err(BreakerError::Open { .. })
    ));
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn snapshot_restores_remaining_cooldown_in_a_new_breaker() {
    let (first, clock) = breaker();
    let _ = timeout(&first).await;
    clock.advance(Duration::from_secs(4));
    let snapshot = first.snapshot();
    assert_eq!(snapshot.failure_count, 1);
    assert!(snapshot.opened_at_ms.is_some());

    let (second, later) = breaker();
    later.advance(Duration::from_secs(5));
    second.restore(snapshot);

    let status = second.status();
    assert!(status.is_open);
    assert_eq!(status.failure_count, 1);
    assert_eq!(status.cooldown_remaining_ms, Some(25_000));
    assert!(matches!(succeed(&second).await, Err(BreakerError::Open { .. })));

    later.advance(Duration::from_secs(25));
    assert_eq!(succeed(&second).await.unwrap(), 7);
}

#[tokio::test]
async fn expired_snapshot_restores_closed() {
    let (first, _) = breaker();
    let _ = timeout(&first).await;
    let snapshot = first.snapshot();

    let (second, later) = breaker();
    later.advance(COOLDOWN);
    second.restore(snapshot);

    assert!(!second.is_open());
    assert_eq!(second.snapshot().opened_at_ms, None);
    assert_eq!(second.snapshot().failure_count, 1);
}

#[test]
fn closed_breaker_snapshots_clear() {
    let (b, _) = breaker();
    assert!(b.snapshot().is_clear());
}
