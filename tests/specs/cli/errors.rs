//! CLI error handling specs

use crate::prelude::*;

#[test]
fn missing_config_file_is_reported() {
    let sandbox = Sandbox::new();
    sandbox
        .ap()
        .args(&["list"])
        .fails()
        .stderr_has("Error: configuration error: config file not found");
}

#[test]
fn duplicate_project_ids_are_rejected() {
    let sandbox = Sandbox::new();
    sandbox.config(
        r#"
[[project]]
name = "Demo"
path = "/src/a"

[[project]]
id = "demo"
name = "Demo Again"
path = "/src/b"
"#,
    );
    sandbox
        .ap()
        .args(&["list"])
        .fails()
        .stderr_has("duplicate project id 'demo'");
}

#[test]
fn unknown_keys_are_rejected() {
    let sandbox = Sandbox::new();
    sandbox.config("[focus]\nmax_depht = 3\n");
    sandbox
        .ap()
        .args(&["list"])
        .fails()
        .stderr_has("configuration error");
}

#[test]
fn unknown_project_fails_without_touching_aerospace() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace(&aerospace_script(ALL_FLAGS, &["1"]));

    let run = sandbox.ap().args(&["close", "nope"]).fails();

    assert_eq!(run.code(), Some(1));
    assert_eq!(run.stderr().trim_end(), "Error: project not found: nope");
    assert!(sandbox.aerospace_calls().is_empty());
}

#[test]
fn missing_aerospace_binary_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.config(TWO_PROJECTS);
    sandbox
        .ap()
        .args(&["reload"])
        .fails()
        .stderr_has("is AeroSpace installed?");
}

#[test]
fn failing_aerospace_command_shows_exit_code_and_stderr() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace("#!/bin/sh\necho 'server not running' >&2\nexit 3\n");
    sandbox
        .ap()
        .args(&["reload"])
        .fails()
        .stderr_has("reload-config` failed with exit code 3: server not running");
}
