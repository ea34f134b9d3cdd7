//! `ap check` and `ap reload` specs

use crate::prelude::*;

#[test]
fn check_passes_when_every_flag_is_advertised() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace(&aerospace_script(ALL_FLAGS, &["1"]));

    sandbox
        .ap()
        .args(&["check"])
        .passes()
        .stdout_eq("AeroSpace CLI: ok\n");
}

#[test]
fn check_lists_every_missing_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace(&aerospace_script("--all --focused --workspace --monitor --format", &["1"]));

    sandbox
        .ap()
        .args(&["check"])
        .fails()
        .stderr_has("list-windows --app-bundle-id")
        .stderr_has("focus --window-id")
        .stderr_has("close --window-id");
}

#[test]
fn reload_calls_reload_config() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace(&aerospace_script(ALL_FLAGS, &["1"]));

    sandbox
        .ap()
        .args(&["-o", "json", "reload"])
        .passes()
        .stdout_eq("{\n  \"reloaded\": true\n}\n");

    assert_eq!(sandbox.aerospace_calls(), vec!["reload-config".to_string()]);
}
