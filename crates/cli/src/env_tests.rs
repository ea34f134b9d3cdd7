// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::path::Path;

const VARS: [&str; 5] = [
    "AP_CONFIG",
    "AP_STATE_DIR",
    "XDG_CONFIG_HOME",
    "XDG_STATE_HOME",
    "HOME",
];

/// Run `f` with the given variables set and every other location variable cleared
fn with_env(set: &[(&str, &str)], f: impl FnOnce()) {
    let saved: Vec<_> = VARS.iter().map(|v| (*v, std::env::var(v).ok())).collect();
    for var in VARS {
        std::env::remove_var(var);
    }
    for (key, value) in set {
        std::env::set_var(key, value);
    }
    f();
    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}

#[test]
#[serial]
fn config_override_wins() {
    with_env(
        &[
            ("AP_CONFIG", "/tmp/ap.toml"),
            ("XDG_CONFIG_HOME", "/xdg"),
            ("HOME", "/home/u"),
        ],
        || assert_eq!(config_path().unwrap(), Path::new("/tmp/ap.toml")),
    );
}

#[test]
#[serial]
fn config_uses_xdg_then_home() {
    with_env(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")], || {
        assert_eq!(
            config_path().unwrap(),
            Path::new("/xdg/agent-panel/config.toml")
        )
    });
    with_env(&[("HOME", "/home/u")], || {
        assert_eq!(
            config_path().unwrap(),
            Path::new("/home/u/.config/agent-panel/config.toml")
        )
    });
}

#[test]
#[serial]
fn state_dir_resolution_order() {
    with_env(
        &[("AP_STATE_DIR", "/state"), ("XDG_STATE_HOME", "/xdg")],
        || assert_eq!(state_dir().unwrap(), Path::new("/state")),
    );
    with_env(&[("XDG_STATE_HOME", "/xdg")], || {
        assert_eq!(state_dir().unwrap(), Path::new("/xdg/agent-panel"))
    });
    with_env(&[("HOME", "/home/u")], || {
        assert_eq!(
            state_dir().unwrap(),
            Path::new("/home/u/.local/state/agent-panel")
        )
    });
}

#[test]
#[serial]
fn empty_values_are_ignored() {
    with_env(&[("AP_STATE_DIR", ""), ("HOME", "/home/u")], || {
        assert_eq!(
            state_dir().unwrap(),
            Path::new("/home/u/.local/state/agent-panel")
        )
    });
}

#[test]
#[serial]
fn missing_home_is_an_error() {
    with_env(&[], || {
        assert!(matches!(state_dir(), Err(EnvError::NoHome(_))));
        assert!(config_path().is_err());
    });
}
