// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ap_adapters::RunError;
use ap_core::{FocusStackEntry, FocusTarget};
use ap_storage::PersistedState;
use tempfile::TempDir;

fn paths(dir: &TempDir) -> Paths {
    Paths {
        config: dir.path().join("config.toml"),
        state_dir: dir.path().join("state"),
    }
}

async fn trip(session: &Session) {
    let _ = session
        .breaker()
        .call(|| async {
            Err::<(), _>(RunError::Timeout {
                program: "aerospace".to_string(),
                timeout: Duration::from_millis(5),
            })
        })
        .await;
}

#[tokio::test]
async fn tripped_breaker_carries_over_to_the_next_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(&dir);
    let config = Config::default();

    let first = Session::open(&config, &paths).await.unwrap();
    trip(&first).await;
    first.save().unwrap();
    drop(first);

    let second = Session::open(&config, &paths).await.unwrap();
    assert!(second.breaker().is_open());
    assert_eq!(second.breaker().status().failure_count, 1);
}

#[tokio::test]
async fn untouched_breaker_leaves_no_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(&dir);

    let session = Session::open(&Config::default(), &paths).await.unwrap();
    session.save().unwrap();

    assert!(!paths.state_file().exists());
}

#[tokio::test]
async fn saving_the_breaker_keeps_focus_history() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(&dir);
    let store = JsonStateStore::new(paths.state_file());
    let entry = FocusStackEntry::new(
        FocusTarget::App {
            bundle_id: "com.apple.finder".to_string(),
        },
        1_000,
    );
    store
        .save(&PersistedState {
            focus_stack: vec![entry.clone()],
            ..PersistedState::default()
        })
        .unwrap();

    let session = Session::open(&Config::default(), &paths).await.unwrap();
    trip(&session).await;
    session.save().unwrap();

    let state = store.load().unwrap();
    assert_eq!(state.focus_stack, vec![entry]);
    assert!(state.circuit.opened_at_ms.is_some());
}

#[tokio::test]
async fn session_holds_the_state_lock_until_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(&dir);

    let session = Session::open(&Config::default(), &paths).await.unwrap();
    assert!(StateLock::try_acquire(paths.lock_file()).unwrap().is_none());

    drop(session);
    assert!(StateLock::try_acquire(paths.lock_file()).unwrap().is_some());
}
