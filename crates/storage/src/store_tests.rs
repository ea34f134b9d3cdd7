// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ap_core::{CircuitSnapshot, FocusStackEntry, FocusTarget};
use std::io::Write;
use tempfile::tempdir;

fn state_with_entries(ids: &[u64]) -> PersistedState {
    PersistedState {
        focus_stack: ids
            .iter()
            .map(|&id| {
                FocusStackEntry::new(
                    FocusTarget::Window {
                        window_id: id,
                        app_bundle_id: "com.apple.Terminal".to_string(),
                        workspace: "1".to_string(),
                    },
                    1_000 + id,
                )
            })
            .collect(),
        ..PersistedState::default()
    }
}

#[test]
fn missing_file_loads_default() {
    let dir = tempdir().unwrap();
    let store = JsonStateStore::new(dir.path().join("state.json"));
    assert_eq!(store.load().unwrap(), PersistedState::default());
}

#[test]
fn save_then_load_preserves_stack_order() {
    let dir = tempdir().unwrap();
    let store = JsonStateStore::new(dir.path().join("nested/state.json"));

    store.save(&state_with_entries(&[3, 1, 2])).unwrap();
    let loaded = store.load().unwrap();

    let ids: Vec<u64> = loaded
        .focus_stack
        .iter()
        .map(|e| match e.target {
            FocusTarget::Window { window_id, .. } => window_id,
            FocusTarget::App { .. } => 0,
        })
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(loaded.saved_at.is_some());
    assert_eq!(loaded.version, CURRENT_STATE_VERSION);
}

#[test]
fn save_leaves_no_tmp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let store = JsonStateStore::new(&path);

    store.save(&state_with_entries(&[1])).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn corrupt_file_moves_to_bak_and_loads_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    {
        let mut file = File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();
    }

    let store = JsonStateStore::new(&path);
    let loaded = store.load().unwrap();

    assert_eq!(loaded, PersistedState::default());
    assert!(!path.exists());
    assert!(path.with_extension("bak").exists());
}

#[test]
fn bak_files_rotate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let store = JsonStateStore::new(&path);

    for round in 0..4 {
        fs::write(&path, format!("corrupt {round}")).unwrap();
        store.load().unwrap();
    }

    assert!(path.with_extension("bak").exists());
    assert!(path.with_extension("bak.2").exists());
    assert!(path.with_extension("bak.3").exists());
    assert!(!path.with_extension("bak.4").exists());
    assert_eq!(
        fs::read_to_string(path.with_extension("bak")).unwrap(),
        "corrupt 3"
    );
}

#[test]
fn newer_version_is_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, r#"{"version": 99, "focus_stack": []}"#).unwrap();

    let err = JsonStateStore::new(&path).load().unwrap_err();
    assert!(matches!(
        err,
        StateError::UnsupportedVersion {
            found: 99,
            supported: CURRENT_STATE_VERSION
        }
    ));
}

#[test]
fn memory_store_injects_failures() {
    let store = MemoryStateStore::with_state(state_with_entries(&[1]));
    assert_eq!(store.load().unwrap().focus_stack.len(), 1);

    store.fail_loads(true);
    assert!(store.load().is_err());

    store.fail_saves(true);
    assert!(store.save(&PersistedState::default()).is_err());
    assert_eq!(store.save_count(), 0);

    store.fail_saves(false);
    store.save(&PersistedState::default()).unwrap();
    assert_eq!(store.save_count(), 1);
    assert!(store.snapshot().focus_stack.is_empty());
}

#[test]
fn circuit_round_trips_next_to_the_stack() {
    let dir = tempdir().unwrap();
    let store = JsonStateStore::new(dir.path().join("state.json"));
    let mut state = state_with_entries(&[4]);
    state.circuit = CircuitSnapshot {
        opened_at_ms: Some(1_767_225_600_000),
        failure_count: 2,
    };

    store.save(&state).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.circuit, state.circuit);
    assert_eq!(loaded.focus_stack, state.focus_stack);
}

#[test]
fn closed_circuit_is_omitted_and_older_files_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let store = JsonStateStore::new(&path);

    store.save(&state_with_entries(&[1])).unwrap();
    assert!(!fs::read_to_string(&path).unwrap().contains("circuit"));

    fs::write(&path, r#"{"version": 1, "focus_stack": []}"#).unwrap();
    assert!(store.load().unwrap().circuit.is_clear());
}
