// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn closes_every_window_and_restores_prior_window() {
    let ctx = setup();
    let terminal = ctx.wm.add_window(TERMINAL, "1", "zsh");
    let (editor, browser) = ctx.bind_demo();
    let stray = ctx.wm.add_window("com.apple.Notes", "ap-demo", "Notes");
    ctx.orch.focus_stack().push(terminal_target(terminal)).unwrap();

    let result = ctx.orch.close("demo").await.unwrap();

    assert_eq!(result.closed, vec![editor, browser, stray]);
    assert_eq!(result.restored, RestoredFocus::Window { window_id: terminal });
    assert!(result.warnings.is_empty());
    assert!(ctx.wm.windows().iter().all(|w| w.workspace != "ap-demo"));
    assert_eq!(ctx.wm.current_window(), Some(terminal));
    assert!(ctx.stack_targets().is_empty());
}

#[tokio::test]
async fn close_failure_is_a_warning_and_the_rest_still_close() {
    let ctx = setup();
    let (editor, browser) = ctx.bind_demo();
    ctx.wm.fail_next(
        WmOp::CloseWindow,
        WmError::CommandFailed {
            command: format!("aerospace close --window-id {}", editor),
            exit_code: 1,
            stderr: "window is busy".to_string(),
        },
    );

    let result = ctx.orch.close("demo").await.unwrap();

    assert_eq!(result.closed, vec![browser]);
    assert!(matches!(
        result.warnings.as_slice(),
        [Warning::CloseFailed { window_id, .. }] if *window_id == editor
    ));
}

#[tokio::test]
async fn stale_entries_are_skipped() {
    let ctx = setup();
    let terminal = ctx.wm.add_window(TERMINAL, "1", "zsh");
    ctx.orch.focus_stack().push(terminal_target(terminal)).unwrap();
    ctx.orch.focus_stack().push(terminal_target(999)).unwrap();

    let result = ctx.orch.close("demo").await.unwrap();

    assert_eq!(result.restored, RestoredFocus::Window { window_id: terminal });
    assert!(matches!(
        result.warnings.as_slice(),
        [Warning::StaleFocusEntry { .. }]
    ));
}

#[tokio::test]
async fn empty_stack_falls_back_to_reserved_workspace() {
    let ctx = setup();
    ctx.bind_demo();
    ctx.wm.set_focused_workspace("ap-demo");

    let result = ctx.orch.close("demo").await.unwrap();

    assert_eq!(
        result.restored,
        RestoredFocus::Workspace {
            name: "1".to_string()
        }
    );
    assert_eq!(ctx.wm.current_workspace(), "1");
}

#[tokio::test]
async fn only_stale_entries_fall_back_too() {
    let ctx = setup();
    ctx.orch.focus_stack().push(terminal_target(998)).unwrap();
    ctx.orch.focus_stack().push(terminal_target(999)).unwrap();

    let result = ctx.orch.close("demo").await.unwrap();

    assert!(matches!(result.restored, RestoredFocus::Workspace { .. }));
    assert_eq!(result.warnings.len(), 2);
}

#[tokio::test]
async fn app_entries_reactivate_the_app() {
    let ctx = setup();
    ctx.orch
        .focus_stack()
        .push(FocusTarget::App {
            bundle_id: "com.apple.finder".to_string(),
        })
        .unwrap();

    let result = ctx.orch.close("demo").await.unwrap();

    assert_eq!(
        result.restored,
        RestoredFocus::App {
            bundle_id: "com.apple.finder".to_string()
        }
    );
    assert_eq!(
        ctx.launcher.calls(),
        vec![LaunchCall::ActivateApp {
            bundle_id: "com.apple.finder".to_string()
        }]
    );
}

#[tokio::test]
async fn expired_entries_are_not_restored() {
    let ctx = setup();
    let terminal = ctx.wm.add_window(TERMINAL, "1", "zsh");
    ctx.orch.focus_stack().push(terminal_target(terminal)).unwrap();
    ctx.clock.advance(Duration::from_secs(25 * 60 * 60));

    let result = ctx.orch.close("demo").await.unwrap();

    assert!(matches!(result.restored, RestoredFocus::Workspace { .. }));
}

#[tokio::test]
async fn restore_timeout_is_an_error() {
    let ctx = setup();
    let terminal = ctx.wm.add_window(TERMINAL, "1", "zsh");
    ctx.orch.focus_stack().push(terminal_target(terminal)).unwrap();
    ctx.wm.fail_next(
        WmOp::FocusWindow,
        WmError::Timeout {
            command: "aerospace focus".to_string(),
            timeout: Duration::from_secs(5),
        },
    );

    let err = ctx.orch.close("demo").await.unwrap_err();

    assert!(matches!(err, ActivationError::CommandFailed { .. }), "{err:?}");
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let ctx = setup();
    let err = ctx.orch.close("nope").await.unwrap_err();
    assert!(matches!(err, ActivationError::ProjectNotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn activate_then_close_returns_to_where_the_user_was() {
    let ctx = setup();
    let terminal = ctx.focus_terminal();

    ctx.orch.activate("demo", &CancelFlag::new()).await.unwrap();
    let result = ctx.orch.close("demo").await.unwrap();

    assert_eq!(result.closed.len(), 2);
    assert_eq!(result.restored, RestoredFocus::Window { window_id: terminal });
    assert_eq!(ctx.wm.current_workspace(), "1");
}

#[tokio::test]
async fn return_to_previous_restores_without_closing() {
    let ctx = setup();
    let terminal = ctx.wm.add_window(TERMINAL, "1", "zsh");
    ctx.bind_demo();
    ctx.orch.focus_stack().push(terminal_target(terminal)).unwrap();

    let result = ctx.orch.return_to_previous().await.unwrap();

    assert_eq!(result.restored, RestoredFocus::Window { window_id: terminal });
    assert_eq!(ctx.wm.call_count(WmOp::CloseWindow), 0);
}

#[tokio::test]
async fn focus_stack_pop_removes_without_restoring() {
    let ctx = setup();
    ctx.orch.focus_stack().push(terminal_target(5)).unwrap();

    let entry = ctx.orch.focus_stack_pop().unwrap().unwrap();

    assert_eq!(entry.target, terminal_target(5));
    assert!(ctx.orch.focus_stack_pop().unwrap().is_none());
    assert!(ctx.wm.calls().is_empty());
}

#[tokio::test]
async fn state_save_failure_surfaces() {
    let ctx = setup();
    ctx.store.fail_saves(true);
    let terminal = ctx.focus_terminal();

    let err = ctx.orch.focus_stack().push(terminal_target(terminal)).unwrap_err();

    assert!(matches!(err, ActivationError::StateSaveFailed { .. }));
}
