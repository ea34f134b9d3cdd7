// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn demo() -> Project {
    Project {
        id: ProjectId::new("demo"),
        name: "Demo".to_string(),
        path: "/Users/me/src/demo".to_string(),
        color: "blue".to_string(),
        remote: None,
        chrome_urls: Vec::new(),
    }
}

#[test]
fn workspace_and_tag_derive_from_id() {
    let project = demo();
    assert_eq!(project.workspace(), "ap-demo");
    assert_eq!(project.tag().as_str(), "AP:demo");
}

#[test]
fn workspace_name_recovers_project_id() {
    assert_eq!(
        WorkspaceName::project_id("ap-demo"),
        Some(ProjectId::new("demo"))
    );
    assert_eq!(WorkspaceName::project_id("ap-"), None);
    assert_eq!(WorkspaceName::project_id("1"), None);
    assert!(!WorkspaceName::is_project_workspace("main"));
}

#[yare::parameterized(
    bare            = { "AP:demo", true },
    vscode_title    = { "AP:demo - main.rs - demo", true },
    chrome_suffix   = { "Inbox - AP:demo", true },
    colon_after     = { "AP:demo: notes", true },
    longer_id       = { "AP:demo-2 - main.rs", false },
    underscore_id   = { "AP:demo_x", false },
    alnum_suffix    = { "AP:demos", false },
    other_project   = { "AP:other", false },
    no_tag          = { "demo - Visual Studio Code", false },
    second_occurrence = { "AP:demo2 / AP:demo", true },
)]
fn tag_matches_whole_token(title: &str, expected: bool) {
    let tag = WindowTag::for_project(&ProjectId::new("demo"));
    assert_eq!(tag.matches(title), expected, "title: {title}");
}

#[test]
fn role_bundle_ids() {
    assert_eq!(Role::Editor.bundle_id(), "com.microsoft.VSCode");
    assert_eq!(Role::Browser.bundle_id(), "com.google.Chrome");
    assert_eq!(Role::Browser.to_string(), "browser");
}

#[test]
fn project_serde_omits_empty_optionals() {
    let json = serde_json::to_value(demo()).unwrap();
    assert!(json.get("remote").is_none());
    assert!(json.get("chrome_urls").is_none());
    assert_eq!(json["id"], "demo");
}

#[test]
fn project_id_compares_with_str_and_serializes_bare() {
    let id = ProjectId::new("demo");
    assert!(id == "demo");
    assert_eq!(id.to_string(), "demo");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"demo\"");
}
