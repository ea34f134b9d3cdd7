// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[parameterized(
    plain = { &["list-windows", "--all"], "aerospace list-windows --all" },
    spaced = { &["workspace", "my space"], "aerospace workspace 'my space'" },
    empty = { &["focus", ""], "aerospace focus ''" },
    none = { &[], "aerospace" },
)]
fn describe_quotes_awkward_args(list: &[&str], expected: &str) {
    assert_eq!(describe("aerospace", &args(list)), expected);
}

#[test]
fn only_timeouts_report_is_timeout() {
    let timeout = RunError::Timeout {
        program: "aerospace".to_string(),
        timeout: Duration::from_secs(1),
    };
    let missing = RunError::NotFound {
        program: "aerospace".to_string(),
    };
    assert!(timeout.is_timeout());
    assert!(!missing.is_timeout());
    assert_eq!(timeout.to_string(), "aerospace timed out after 1000ms");
}

#[tokio::test]
async fn fake_runner_replays_queue_then_sticks_on_last() {
    let runner = FakeRunner::new();
    runner.on(&["list-workspaces", "--focused"], FakeResponse::stdout("1\n"));
    runner.on(&["list-workspaces", "--focused"], FakeResponse::stdout("ap-demo\n"));
    let call = args(&["list-workspaces", "--focused"]);

    let first = runner.run("aerospace", &call, Duration::from_secs(1)).await.unwrap();
    let second = runner.run("aerospace", &call, Duration::from_secs(1)).await.unwrap();
    let third = runner.run("aerospace", &call, Duration::from_secs(1)).await.unwrap();

    assert_eq!(first.stdout, "1\n");
    assert_eq!(second.stdout, "ap-demo\n");
    assert_eq!(third.stdout, "ap-demo\n");
    assert_eq!(runner.calls().len(), 3);
}

#[tokio::test]
async fn fake_runner_scripts_errors_and_fallback() {
    let runner = FakeRunner::new();
    runner.on(&["reload-config"], FakeResponse::Timeout);
    runner.set_fallback(FakeResponse::exit(2, "nope"));

    let err = runner
        .run("aerospace", &args(&["reload-config"]), Duration::from_millis(5))
        .await
        .unwrap_err();
    assert!(err.is_timeout());

    let out = runner
        .run("aerospace", &args(&["focus"]), Duration::from_millis(5))
        .await
        .unwrap();
    assert_eq!(out.exit_code, 2);
    assert_eq!(out.stderr, "nope");
}
