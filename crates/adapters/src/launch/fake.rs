// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake launcher that opens windows in a [`FakeWindowManager`]
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AppLauncher, LaunchError};
use crate::wm::FakeWindowManager;
use ap_core::{Project, Role};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Recorded launcher call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchCall {
    Launch { role: Role, project: String },
    ActivateApp { bundle_id: String },
}

/// What happens when a role is launched
#[derive(Debug, Clone)]
pub enum LaunchBehavior {
    /// A tagged window appears after `delay_queries` window manager calls.
    /// `workspace: None` places it on the workspace focused at launch time.
    Appear {
        workspace: Option<String>,
        delay_queries: u32,
        focus: bool,
    },
    /// The command succeeds but no window ever shows up
    NoWindow,
    Fail(LaunchError),
}

impl Default for LaunchBehavior {
    fn default() -> Self {
        LaunchBehavior::Appear {
            workspace: None,
            delay_queries: 0,
            focus: true,
        }
    }
}

#[derive(Default)]
struct FakeLauncherState {
    behaviors: HashMap<Role, LaunchBehavior>,
    calls: Vec<LaunchCall>,
    launched: Vec<u64>,
    frontmost: Option<String>,
}

#[derive(Clone)]
pub struct FakeLauncher {
    wm: FakeWindowManager,
    inner: Arc<Mutex<FakeLauncherState>>,
}

impl FakeLauncher {
    pub fn new(wm: FakeWindowManager) -> Self {
        Self {
            wm,
            inner: Arc::new(Mutex::new(FakeLauncherState::default())),
        }
    }

    pub fn set_behavior(&self, role: Role, behavior: LaunchBehavior) {
        self.inner.lock().behaviors.insert(role, behavior);
    }

    pub fn calls(&self) -> Vec<LaunchCall> {
        self.inner.lock().calls.clone()
    }

    pub fn launch_count(&self, role: Role) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, LaunchCall::Launch { role: r, .. } if *r == role))
            .count()
    }

    pub fn set_frontmost_app(&self, bundle_id: Option<&str>) {
        self.inner.lock().frontmost = bundle_id.map(str::to_string);
    }

    /// Ids of windows created by launches, in order
    pub fn launched_windows(&self) -> Vec<u64> {
        self.inner.lock().launched.clone()
    }
}

/// Title a freshly launched window would carry
pub fn launched_title(role: Role, project: &Project) -> String {
    match role {
        Role::Editor => format!("{} - Welcome - {}", project.tag(), project.name),
        Role::Browser => format!("{} - New Tab", project.tag()),
    }
}

#[async_trait]
impl AppLauncher for FakeLauncher {
    async fn launch(&self, role: Role, project: &Project) -> Result<(), LaunchError> {
        let behavior = {
            let mut inner = self.inner.lock();
            inner.calls.push(LaunchCall::Launch {
                role,
                project: project.id.to_string(),
            });
            inner.behaviors.get(&role).cloned().unwrap_or_default()
        };

        match behavior {
            LaunchBehavior::Appear {
                workspace,
                delay_queries,
                focus,
            } => {
                let workspace = workspace.unwrap_or_else(|| self.wm.current_workspace());
                let id = self.wm.add_window_later(
                    delay_queries,
                    role.bundle_id(),
                    &workspace,
                    &launched_title(role, project),
                    focus,
                );
                self.inner.lock().launched.push(id);
                Ok(())
            }
            LaunchBehavior::NoWindow => Ok(()),
            LaunchBehavior::Fail(err) => Err(err),
        }
    }

    async fn activate_app(&self, bundle_id: &str) -> Result<(), LaunchError> {
        self.inner.lock().calls.push(LaunchCall::ActivateApp {
            bundle_id: bundle_id.to_string(),
        });
        self.inner.lock().frontmost = Some(bundle_id.to_string());
        Ok(())
    }

    async fn frontmost_app(&self) -> Result<Option<String>, LaunchError> {
        Ok(self.inner.lock().frontmost.clone())
    }
}
