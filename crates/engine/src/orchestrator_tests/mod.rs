// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator tests

mod activate;
mod close;
mod scenarios;

use super::*;
use crate::cancel::CancelFlag;
use crate::error::Warning;
use crate::layout::DisplayMode;
use crate::locator::{LocateError, Located, LocatorTiming, Stage, StagedLocator};
use ap_adapters::launch::launched_title;
use ap_adapters::{
    FakeLauncher, FakeScreen, FakeWindowManager, LaunchBehavior, LaunchCall, WmCall, WmError,
    WmOp,
};
use ap_core::{FakeClock, FocusTarget, Role, SequentialIdGen, WindowRecord};
use ap_storage::MemoryStateStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const CONFIG: &str = r#"
[[project]]
name = "Demo"
path = "/src/demo"

[[project]]
name = "Other"
path = "/src/other"
"#;

const TERMINAL: &str = "com.apple.Terminal";

type TestLocator = StagedLocator<FakeWindowManager, FakeLauncher>;

type TestOrchestrator<Loc = TestLocator> = Orchestrator<
    FakeWindowManager,
    Loc,
    FakeLauncher,
    FakeScreen,
    MemoryStateStore,
    FakeClock,
    SequentialIdGen,
>;

struct TestContext<Loc = TestLocator> {
    orch: TestOrchestrator<Loc>,
    wm: FakeWindowManager,
    launcher: FakeLauncher,
    screen: FakeScreen,
    store: MemoryStateStore,
    clock: FakeClock,
}

fn test_config() -> Arc<Config> {
    Arc::new(Config::parse(CONFIG).unwrap())
}

fn setup() -> TestContext {
    setup_with_screen(FakeScreen::new())
}

fn setup_with_screen(screen: FakeScreen) -> TestContext {
    let wm = FakeWindowManager::new();
    let launcher = FakeLauncher::new(wm.clone());
    let config = test_config();
    let locator = StagedLocator::new(
        wm.clone(),
        launcher.clone(),
        LocatorTiming::from(&config.locator),
    );
    build(wm, launcher, screen, locator)
}

fn setup_with_locator<Loc: WindowLocator>(locator: Loc) -> TestContext<Loc> {
    let wm = FakeWindowManager::new();
    let launcher = FakeLauncher::new(wm.clone());
    build(wm, launcher, FakeScreen::new(), locator)
}

fn build<Loc: WindowLocator>(
    wm: FakeWindowManager,
    launcher: FakeLauncher,
    screen: FakeScreen,
    locator: Loc,
) -> TestContext<Loc> {
    let config = test_config();
    let store = MemoryStateStore::new();
    let clock = FakeClock::new();
    let focus = FocusStack::new(store.clone(), clock.clone(), &config.focus);
    let orch = Orchestrator::new(
        OrchestratorDeps {
            wm: wm.clone(),
            locator,
            launcher: launcher.clone(),
            screen: screen.clone(),
        },
        focus,
        config,
        SequentialIdGen::new("act"),
    );
    TestContext {
        orch,
        wm,
        launcher,
        screen,
        store,
        clock,
    }
}

impl<Loc: WindowLocator> TestContext<Loc> {
    fn project(&self, id: &str) -> Project {
        self.orch.config().project(id).cloned().unwrap()
    }

    /// Tagged editor and browser already sitting in `ap-demo`
    fn bind_demo(&self) -> (u64, u64) {
        let demo = self.project("demo");
        let editor = self.wm.add_window(
            Role::Editor.bundle_id(),
            "ap-demo",
            &launched_title(Role::Editor, &demo),
        );
        let browser = self.wm.add_window(
            Role::Browser.bundle_id(),
            "ap-demo",
            &launched_title(Role::Browser, &demo),
        );
        (editor, browser)
    }

    /// A focused terminal window on workspace 1
    fn focus_terminal(&self) -> u64 {
        let id = self.wm.add_window(TERMINAL, "1", "zsh");
        self.wm.set_focused_window(Some(id));
        id
    }

    fn stack_targets(&self) -> Vec<FocusTarget> {
        self.store
            .snapshot()
            .focus_stack
            .into_iter()
            .map(|e| e.target)
            .collect()
    }
}

fn terminal_target(window_id: u64) -> FocusTarget {
    FocusTarget::Window {
        window_id,
        app_bundle_id: TERMINAL.to_string(),
        workspace: "1".to_string(),
    }
}

/// Locator with canned per-role results.
///
/// The browser search waits for cancellation when no result is scripted.
#[derive(Clone)]
struct ScriptedLocator {
    editor: Result<Located, LocateError>,
    browser: Option<Result<Located, LocateError>>,
    browser_cancelled: Arc<AtomicBool>,
}

impl ScriptedLocator {
    fn new(editor: Result<Located, LocateError>, browser: Option<Result<Located, LocateError>>) -> Self {
        Self {
            editor,
            browser,
            browser_cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    fn browser_was_cancelled(&self) -> bool {
        self.browser_cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WindowLocator for ScriptedLocator {
    async fn locate(
        &self,
        role: Role,
        _project: &Project,
        cancel: &CancelFlag,
    ) -> Result<Located, LocateError> {
        match role {
            Role::Editor => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                self.editor.clone()
            }
            Role::Browser => match &self.browser {
                Some(result) => result.clone(),
                None => loop {
                    if cancel.is_cancelled() {
                        self.browser_cancelled.store(true, Ordering::SeqCst);
                        return Err(LocateError::Cancelled);
                    }
                    tokio::time::sleep(Duration::from_millis(10)).await;
                },
            },
        }
    }
}

fn located(window: WindowRecord, stage: Stage) -> Located {
    Located {
        window,
        stage,
        launched: !stage.was_bound(),
        moved: false,
        warnings: Vec::new(),
    }
}
