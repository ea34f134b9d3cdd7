//! `ap list` specs

use crate::prelude::*;

#[test]
fn list_shows_configured_projects_with_open_state() {
    let sandbox = Sandbox::new();
    sandbox
        .config(TWO_PROJECTS)
        .aerospace(&aerospace_script(ALL_FLAGS, &["1", "ap-demo"]));

    sandbox.ap().args(&["list"]).passes().stdout_eq(
        "\
ID           NAME         WORKSPACE       TAG             OPEN    PATH
demo         Demo         ap-demo         AP:demo         active  /src/demo
infra-tools  Infra Tools  ap-infra-tools  AP:infra-tools  -       /src/infra
",
    );
}

#[test]
fn list_still_works_without_aerospace() {
    let sandbox = Sandbox::new();
    sandbox.config(TWO_PROJECTS);

    let run = sandbox.ap().args(&["-o", "json", "list"]).passes();
    let json = run.json();

    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["id"], "demo");
    assert_eq!(json[0]["workspace"], "ap-demo");
    assert_eq!(json[0]["tag"], "AP:demo");
    assert!(json[0]["open"].is_null());
    assert!(sandbox.log().contains("workspace listing unavailable"));
}

#[test]
fn list_with_no_projects() {
    let sandbox = Sandbox::new();
    sandbox
        .config("")
        .aerospace(&aerospace_script(ALL_FLAGS, &["1"]));
    sandbox
        .ap()
        .args(&["list"])
        .passes()
        .stdout_eq("No projects configured\n");
}
