//! Circuit breaker specs: a hung AeroSpace trips the breaker for later invocations

use crate::prelude::*;

fn hung_sandbox() -> Sandbox {
    let sandbox = Sandbox::new();
    sandbox
        .config_with_timeout(TWO_PROJECTS, 300)
        .aerospace(&hanging_aerospace_script());
    sandbox
}

#[test]
fn second_activation_after_a_timeout_fails_fast() {
    let sandbox = hung_sandbox();

    sandbox
        .ap()
        .args(&["activate", "demo"])
        .fails()
        .stderr_has("timed out");
    let calls = sandbox.aerospace_calls().len();
    assert_eq!(calls, 1);

    sandbox
        .ap()
        .args(&["activate", "demo"])
        .fails()
        .stderr_has("circuit breaker open")
        .stderr_lacks("timed out");
    assert_eq!(sandbox.aerospace_calls().len(), calls);
}

#[test]
fn open_breaker_also_blocks_other_commands() {
    let sandbox = hung_sandbox();
    sandbox.ap().args(&["activate", "demo"]).fails();

    sandbox
        .ap()
        .args(&["close", "infra-tools"])
        .fails()
        .stderr_has("circuit breaker open");
    assert_eq!(sandbox.aerospace_calls().len(), 1);
}

#[test]
fn concurrent_activations_are_serialized() {
    let sandbox = hung_sandbox();

    let first = sandbox.ap().args(&["activate", "demo"]).spawn();
    let second = sandbox.ap().args(&["activate", "infra-tools"]).spawn();
    let runs = [RunAssert::wait(first), RunAssert::wait(second)];

    assert!(runs.iter().all(|run| run.code() != Some(0)));
    let stderr: Vec<String> = runs.iter().map(RunAssert::stderr).collect();
    assert_eq!(
        stderr.iter().filter(|e| e.contains("timed out")).count(),
        1,
        "{stderr:?}"
    );
    assert_eq!(
        stderr
            .iter()
            .filter(|e| e.contains("circuit breaker open"))
            .count(),
        1,
        "{stderr:?}"
    );
    assert_eq!(sandbox.aerospace_calls().len(), 1);
}
