//! `ap return` specs

use crate::prelude::*;

#[test]
fn return_with_no_history_falls_back_to_workspace_one() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace(&aerospace_script(ALL_FLAGS, &["1"]));

    sandbox
        .ap()
        .args(&["return"])
        .passes()
        .stdout_eq("Returned to workspace 1 (fallback)\n");

    assert_eq!(sandbox.aerospace_calls(), vec!["workspace 1".to_string()]);
}

#[test]
fn return_honors_configured_fallback() {
    let sandbox = Sandbox::new();
    sandbox
        .config(&format!("[focus]\nfallback_workspace = \"main\"\n{}", TWO_PROJECTS))
        .aerospace(&aerospace_script(ALL_FLAGS, &["main"]));

    let run = sandbox.ap().args(&["-o", "json", "return"]).passes();

    assert_eq!(run.json()["restored"]["kind"], "workspace");
    assert_eq!(run.json()["restored"]["name"], "main");
}

#[test]
fn commands_write_the_log_file() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace(&aerospace_script(ALL_FLAGS, &["1"]));

    sandbox.ap().args(&["return"]).passes();

    assert!(sandbox.state_path().join("ap.log").exists());
}
