// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end activation scenarios

use super::*;
use ap_adapters::{AeroSpaceClient, CircuitBreaker, FakeResponse, FakeRunner, ScreenInfo};
use ap_core::Rect;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[tokio::test(start_paused = true)]
async fn fresh_wide_activation_on_5000px_display() {
    let ctx = setup_with_screen(FakeScreen::with_info(ScreenInfo {
        pixel_width: 5000,
        visible_frame: Rect::new(0.0, 25.0, 2500.0, 1375.0),
    }));
    ctx.focus_terminal();

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(result.layout, Some(DisplayMode::Wide));
    let frames = ctx.screen.frames();
    let editor = frames
        .iter()
        .find(|f| f.window_id == result.editor_window_id)
        .unwrap();
    let browser = frames
        .iter()
        .find(|f| f.window_id == result.browser_window_id)
        .unwrap();
    assert_eq!(editor.tag, "AP:demo");
    assert!(approx(editor.frame.x, 0.0));
    assert!(approx(editor.frame.width, 0.55 * 2500.0));
    assert!(approx(browser.frame.x, 0.56 * 2500.0));
    assert!(approx(browser.frame.width, 0.44 * 2500.0));
    assert!(approx(editor.frame.y, 25.0));
    assert!(approx(editor.frame.height, 1375.0));
    assert_eq!(ctx.wm.current_window(), Some(result.editor_window_id));
}

#[tokio::test(start_paused = true)]
async fn second_activation_keeps_user_resized_windows() {
    let ctx = setup();

    let first = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();
    let frames_after_first = ctx.screen.frames().len();
    let second = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(first.editor_window_id, second.editor_window_id);
    assert_eq!(first.browser_window_id, second.browser_window_id);
    assert_eq!(second.layout, None);
    assert_eq!(ctx.screen.frames().len(), frames_after_first);
    assert_eq!(ctx.launcher.launch_count(Role::Editor), 1);
    assert_eq!(ctx.launcher.launch_count(Role::Browser), 1);
    assert_ne!(first.request_id, second.request_id);
}

#[tokio::test(start_paused = true)]
async fn two_tagged_browsers_bind_the_lower_id() {
    let ctx = setup();
    let demo = ctx.project("demo");
    let browser_title = launched_title(Role::Browser, &demo);
    ctx.wm.add_window_with_id(
        7,
        Role::Editor.bundle_id(),
        "ap-demo",
        &launched_title(Role::Editor, &demo),
    );
    ctx.wm
        .add_window_with_id(42, Role::Browser.bundle_id(), "ap-demo", &browser_title);
    ctx.wm
        .add_window_with_id(11, Role::Browser.bundle_id(), "ap-demo", &browser_title);
    ctx.wm.set_focused_workspace("ap-demo");

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(result.browser_window_id, 11);
    assert_eq!(
        result.warnings,
        vec![Warning::AmbiguousWindows {
            role: Role::Browser,
            candidates: vec![11, 42],
            chosen: 11,
        }]
    );
}

type CliWm = AeroSpaceClient<FakeRunner, FakeClock>;

#[tokio::test(start_paused = true)]
async fn timeout_opens_breaker_and_later_activation_fails_fast() {
    let runner = FakeRunner::new();
    let clock = FakeClock::new();
    let breaker = Arc::new(CircuitBreaker::new(
        "aerospace",
        Duration::from_secs(30),
        clock.clone(),
    ));
    let wm: CliWm = AeroSpaceClient::new("aerospace", runner.clone(), breaker, Duration::from_secs(5));
    let launcher = FakeLauncher::new(FakeWindowManager::new());
    let config = test_config();
    let locator = StagedLocator::new(
        wm.clone(),
        launcher.clone(),
        LocatorTiming::from(&config.locator),
    );
    let orch = Orchestrator::new(
        OrchestratorDeps {
            wm: wm.clone(),
            locator,
            launcher,
            screen: FakeScreen::new(),
        },
        FocusStack::new(MemoryStateStore::new(), clock.clone(), &config.focus),
        config,
        SequentialIdGen::default(),
    );
    runner.set_fallback(FakeResponse::Timeout);

    let first = orch.activate("demo", &CancelFlag::new()).await.unwrap_err();
    match &first {
        ActivationError::CommandFailed { stderr, .. } => {
            assert!(stderr.contains("timed out"), "{stderr}")
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert!(wm.breaker().is_open());
    let calls_before = runner.calls().len();

    clock.advance(Duration::from_secs(5));
    let second = orch.activate("demo", &CancelFlag::new()).await.unwrap_err();

    match &second {
        ActivationError::CommandFailed {
            exit_code, stderr, ..
        } => {
            assert_eq!(*exit_code, None);
            assert!(stderr.contains("circuit breaker open"), "{stderr}");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert_eq!(runner.calls().len(), calls_before);

    clock.advance(Duration::from_secs(25));
    let _ = orch.activate("demo", &CancelFlag::new()).await;
    assert!(runner.calls().len() > calls_before);
}
