// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn circuit_open_surfaces_as_command_failed() {
    let err: ActivationError = WmError::CircuitOpen {
        command: "aerospace list-windows --focused".to_string(),
        remaining: Duration::from_secs(25),
    }
    .into();
    match err {
        ActivationError::CommandFailed {
            command,
            exit_code,
            stderr,
        } => {
            assert_eq!(command, "aerospace list-windows --focused");
            assert_eq!(exit_code, None);
            assert!(stderr.contains("circuit breaker open"), "got {stderr}");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn command_failure_keeps_exit_code_and_stderr() {
    let err: ActivationError = WmError::CommandFailed {
        command: "aerospace focus --window-id 7".to_string(),
        exit_code: 1,
        stderr: "Invalid window id".to_string(),
    }
    .into();
    assert_eq!(
        err.to_string(),
        "`aerospace focus --window-id 7` failed with exit code 1: Invalid window id"
    );
}

#[test]
fn incompatible_maps_to_dedicated_variant() {
    let err: ActivationError = WmError::Incompatible {
        missing: vec!["list-windows --monitor".to_string()],
    }
    .into();
    assert_eq!(
        err,
        ActivationError::AeroSpaceIncompatible {
            missing: vec!["list-windows --monitor".to_string()]
        }
    );
}

#[test]
fn launch_failure_carries_command() {
    let err: ActivationError = LaunchError::CommandFailed {
        command: "open -b com.google.Chrome".to_string(),
        exit_code: 1,
        stderr: "no app".to_string(),
    }
    .into();
    assert!(matches!(
        err,
        ActivationError::CommandFailed { exit_code: Some(1), .. }
    ));
}

#[test]
fn errors_serialize_with_kind_tag() {
    let json = serde_json::to_value(ActivationError::RequiredWindowMissing {
        role: Role::Browser,
        project: "demo".to_string(),
    })
    .unwrap();
    assert_eq!(json["kind"], "required_window_missing");
    assert_eq!(json["role"], "browser");
}

#[test]
fn ambiguity_warning_reads_well() {
    let warning = Warning::AmbiguousWindows {
        role: Role::Browser,
        candidates: vec![11, 42],
        chosen: 11,
    };
    assert_eq!(
        warning.to_string(),
        "2 browser windows share the tag [11, 42]; using 11"
    );
}
