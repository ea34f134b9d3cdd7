// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test(start_paused = true)]
async fn fresh_activation_launches_lays_out_and_focuses_editor() {
    let ctx = setup();
    let terminal = ctx.focus_terminal();

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(result.project, "demo");
    assert_eq!(result.workspace, "ap-demo");
    assert_eq!(result.request_id, "act-1");
    assert_eq!(result.layout, Some(DisplayMode::Wide));
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(ctx.launcher.launch_count(Role::Editor), 1);
    assert_eq!(ctx.launcher.launch_count(Role::Browser), 1);
    assert_eq!(ctx.screen.frames().len(), 2);

    assert_eq!(ctx.wm.current_window(), Some(result.editor_window_id));
    assert_eq!(
        ctx.wm.calls().last(),
        Some(&WmCall::FocusWindow {
            window_id: result.editor_window_id
        })
    );
    for id in [result.editor_window_id, result.browser_window_id] {
        assert_eq!(ctx.wm.window(id).unwrap().workspace, "ap-demo");
    }
    assert_eq!(ctx.stack_targets(), vec![terminal_target(terminal)]);
}

#[tokio::test(start_paused = true)]
async fn workspace_is_focused_before_any_window_query() {
    let ctx = setup();
    ctx.bind_demo();

    ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    let calls = ctx.wm.calls();
    let summon = calls
        .iter()
        .position(|c| matches!(c, WmCall::SummonWorkspace { .. }))
        .unwrap();
    let first_listing = calls
        .iter()
        .position(|c| c.op() == WmOp::ListWindows)
        .unwrap();
    assert!(summon < first_listing, "{:?}", calls);
}

#[tokio::test(start_paused = true)]
async fn active_project_is_not_relaid_out() {
    let ctx = setup();
    let (editor, browser) = ctx.bind_demo();
    ctx.wm.set_focused_workspace("ap-demo");

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(result.editor_window_id, editor);
    assert_eq!(result.browser_window_id, browser);
    assert_eq!(result.layout, None);
    assert!(ctx.launcher.calls().is_empty());
    assert!(ctx.screen.frames().is_empty());
    assert_eq!(ctx.wm.call_count(WmOp::SummonWorkspace), 0);
    assert_eq!(ctx.wm.call_count(WmOp::MoveWindow), 0);
    assert_eq!(ctx.wm.current_window(), Some(editor));
}

#[tokio::test(start_paused = true)]
async fn one_bound_window_skips_layout() {
    let ctx = setup();
    let demo = ctx.project("demo");
    ctx.wm.add_window(
        Role::Editor.bundle_id(),
        "ap-demo",
        &launched_title(Role::Editor, &demo),
    );

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(ctx.launcher.launch_count(Role::Editor), 0);
    assert_eq!(ctx.launcher.launch_count(Role::Browser), 1);
    assert_eq!(result.layout, None);
    assert!(ctx.screen.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn focus_in_a_project_workspace_is_not_recorded() {
    let ctx = setup();
    let other = ctx.wm.add_window(TERMINAL, "ap-other", "zsh");
    ctx.wm.set_focused_window(Some(other));

    ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert!(ctx.stack_targets().is_empty());
}

#[tokio::test(start_paused = true)]
async fn windowless_focus_records_frontmost_app() {
    let ctx = setup();
    ctx.launcher.set_frontmost_app(Some("com.apple.finder"));

    ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(
        ctx.stack_targets(),
        vec![FocusTarget::App {
            bundle_id: "com.apple.finder".to_string()
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn unknown_project_fails_without_touching_the_window_manager() {
    let ctx = setup();

    let err = ctx
        .orch
        .activate("nope", &CancelFlag::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ActivationError::ProjectNotFound {
            project: "nope".to_string()
        }
    );
    assert!(ctx.wm.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn workspace_that_never_focuses_fails_before_locating() {
    let ctx = setup();
    ctx.wm.set_summon_ignored(true);

    let err = ctx
        .orch
        .activate("demo", &CancelFlag::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ActivationError::WorkspaceNotFocused {
            expected: "ap-demo".to_string(),
            actual: "1".to_string(),
        }
    );
    assert_eq!(ctx.wm.call_count(WmOp::ListWindows), 0);
    assert!(ctx.launcher.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_while_waiting_for_workspace_focus() {
    let ctx = setup();
    ctx.wm.set_summon_ignored(true);
    let cancel = CancelFlag::new();
    let trigger = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            cancel.cancel();
        })
    };

    let err = ctx.orch.activate("demo", &cancel).await.unwrap_err();
    trigger.await.unwrap();

    assert_eq!(err, ActivationError::Cancelled);
    assert_eq!(ctx.wm.call_count(WmOp::ListWindows), 0);
}

#[tokio::test(start_paused = true)]
async fn move_that_steals_workspace_focus_fails() {
    let ctx = setup();
    ctx.launcher.set_behavior(
        Role::Editor,
        LaunchBehavior::Appear {
            workspace: Some("1".to_string()),
            delay_queries: 0,
            focus: true,
        },
    );
    ctx.launcher.set_behavior(
        Role::Browser,
        LaunchBehavior::Appear {
            workspace: None,
            delay_queries: 0,
            focus: false,
        },
    );
    ctx.wm.set_move_steals_focus_to(Some("1"));

    let err = ctx
        .orch
        .activate("demo", &CancelFlag::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ActivationError::WorkspaceNotFocusedAfterMove {
            expected: "ap-demo".to_string(),
            actual: "1".to_string(),
        }
    );
    assert!(ctx.screen.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn editor_failure_cancels_browser_search() {
    let locator = ScriptedLocator::new(
        Err(LocateError::NotFound {
            role: Role::Editor,
            tag: ap_core::WindowTag::for_project(&ap_core::ProjectId::new("demo")),
            deadline: Duration::from_secs(10),
        }),
        None,
    );
    let ctx = setup_with_locator(locator.clone());

    let err = ctx
        .orch
        .activate("demo", &CancelFlag::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ActivationError::RequiredWindowMissing {
            role: Role::Editor,
            project: "demo".to_string(),
        }
    );
    assert!(locator.browser_was_cancelled());
}

#[tokio::test(start_paused = true)]
async fn windows_found_elsewhere_are_moved_home() {
    let wm_windows = [
        WindowRecord {
            window_id: 7,
            app_bundle_id: Role::Editor.bundle_id().to_string(),
            workspace: "3".to_string(),
            title: "AP:demo - main.rs".to_string(),
        },
        WindowRecord {
            window_id: 8,
            app_bundle_id: Role::Browser.bundle_id().to_string(),
            workspace: "ap-demo".to_string(),
            title: "AP:demo - Docs".to_string(),
        },
    ];
    let locator = ScriptedLocator::new(
        Ok(located(wm_windows[0].clone(), Stage::FocusedRecovery)),
        Some(Ok(located(wm_windows[1].clone(), Stage::ShortPoll))),
    );
    let ctx = setup_with_locator(locator);
    for w in &wm_windows {
        ctx.wm
            .add_window_with_id(w.window_id, &w.app_bundle_id, &w.workspace, &w.title);
    }

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(ctx.wm.window(7).unwrap().workspace, "ap-demo");
    assert!(ctx.wm.calls().contains(&WmCall::MoveWindow {
        window_id: 7,
        workspace: "ap-demo".to_string(),
    }));
    assert_eq!(result.layout, Some(DisplayMode::Wide));
}

#[tokio::test(start_paused = true)]
async fn failed_move_is_move_failed() {
    let locator = ScriptedLocator::new(
        Ok(located(
            WindowRecord {
                window_id: 7,
                app_bundle_id: Role::Editor.bundle_id().to_string(),
                workspace: "3".to_string(),
                title: "AP:demo".to_string(),
            },
            Stage::FocusedRecovery,
        )),
        Some(Ok(located(
            WindowRecord {
                window_id: 8,
                app_bundle_id: Role::Browser.bundle_id().to_string(),
                workspace: "ap-demo".to_string(),
                title: "AP:demo".to_string(),
            },
            Stage::Scoped,
        ))),
    );
    let ctx = setup_with_locator(locator);

    // Window 7 is unknown to the window manager, so the move fails
    let err = ctx
        .orch
        .activate("demo", &CancelFlag::new())
        .await
        .unwrap_err();

    assert!(
        matches!(err, ActivationError::MoveFailed { window_id: 7, .. }),
        "{err:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn unavailable_screen_is_a_warning() {
    let ctx = setup();
    ctx.screen.set_unavailable("osascript: not allowed");

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(result.layout, None);
    assert!(matches!(
        result.warnings.as_slice(),
        [Warning::LayoutNotApplied {
            error: ActivationError::ScreenMetricsUnavailable { .. }
        }]
    ));
    assert_eq!(ctx.wm.current_window(), Some(result.editor_window_id));
}

#[tokio::test(start_paused = true)]
async fn resize_failure_is_a_warning() {
    let editor = WindowRecord {
        window_id: 7,
        app_bundle_id: Role::Editor.bundle_id().to_string(),
        workspace: "ap-demo".to_string(),
        title: "AP:demo".to_string(),
    };
    let browser = WindowRecord {
        window_id: 8,
        app_bundle_id: Role::Browser.bundle_id().to_string(),
        workspace: "ap-demo".to_string(),
        title: "AP:demo".to_string(),
    };
    let locator = ScriptedLocator::new(
        Ok(located(editor.clone(), Stage::ShortPoll)),
        Some(Ok(located(browser.clone(), Stage::ShortPoll))),
    );
    let ctx = setup_with_locator(locator);
    for w in [&editor, &browser] {
        ctx.wm
            .add_window_with_id(w.window_id, &w.app_bundle_id, &w.workspace, &w.title);
    }
    ctx.screen.fail_window(8);

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(result.layout, None);
    assert!(matches!(
        result.warnings.as_slice(),
        [Warning::LayoutNotApplied {
            error: ActivationError::ResizeFailed { window_id: 8, .. }
        }]
    ));
}

#[tokio::test(start_paused = true)]
async fn compact_display_maximizes_both_windows() {
    let ctx = setup_with_screen(FakeScreen::compact());

    let result = ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();

    assert_eq!(result.layout, Some(DisplayMode::Compact));
    let frames = ctx.screen.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].frame, frames[1].frame);
    assert_eq!(frames[0].frame.width, 1512.0);
}

#[tokio::test(start_paused = true)]
async fn cancelled_request_stops_early() {
    let ctx = setup();
    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = ctx.orch.activate("demo", &cancel).await.unwrap_err();

    assert_eq!(err, ActivationError::Cancelled);
    assert!(ctx.launcher.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn focus_query_failure_surfaces_as_command_failed() {
    let ctx = setup();
    ctx.wm.fail_next(
        WmOp::FocusedWindow,
        WmError::CircuitOpen {
            command: "aerospace list-windows --focused".to_string(),
            remaining: Duration::from_secs(25),
        },
    );

    let err = ctx
        .orch
        .activate("demo", &CancelFlag::new())
        .await
        .unwrap_err();

    assert!(
        matches!(err, ActivationError::CommandFailed { exit_code: None, .. }),
        "{err:?}"
    );
    assert_eq!(ctx.wm.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn launch_calls_name_the_project() {
    let ctx = setup();
    ctx.orch.activate("other", &CancelFlag::new()).await.unwrap();

    assert!(ctx.launcher.calls().contains(&LaunchCall::Launch {
        role: Role::Browser,
        project: "other".to_string(),
    }));
    assert_eq!(ctx.wm.current_workspace(), "ap-other");
}
