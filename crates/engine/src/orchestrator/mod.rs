// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project activation and close.
//!
//! The orchestrator owns no window state of its own: every decision is made
//! from a fresh window manager query, and the focus stack is the only
//! history it consults.

mod activation;
mod close;

pub use activation::{ActivationResult, ActivationState};
pub use close::{CloseResult, RestoredFocus, ReturnResult};

use crate::error::ActivationError;
use crate::focus_stack::FocusStack;
use crate::locator::WindowLocator;
use ap_adapters::{AppLauncher, ScreenMetrics, WindowManager, WindowPositioner};
use ap_core::{Clock, Config, FocusStackEntry, IdGen, Project};
use ap_storage::StateStore;
use std::sync::Arc;

/// Adapter dependencies
pub struct OrchestratorDeps<W, Loc, L, Scr> {
    pub wm: W,
    pub locator: Loc,
    pub launcher: L,
    pub screen: Scr,
}

pub struct Orchestrator<W, Loc, L, Scr, S, C, I> {
    pub(crate) wm: W,
    pub(crate) locator: Loc,
    pub(crate) launcher: L,
    pub(crate) screen: Scr,
    pub(crate) focus: FocusStack<S, C>,
    pub(crate) config: Arc<Config>,
    pub(crate) ids: I,
}

impl<W, Loc, L, Scr, S, C, I> Orchestrator<W, Loc, L, Scr, S, C, I>
where
    W: WindowManager,
    Loc: WindowLocator,
    L: AppLauncher,
    Scr: ScreenMetrics + WindowPositioner,
    S: StateStore,
    C: Clock,
    I: IdGen,
{
    pub fn new(
        deps: OrchestratorDeps<W, Loc, L, Scr>,
        focus: FocusStack<S, C>,
        config: Arc<Config>,
        ids: I,
    ) -> Self {
        Self {
            wm: deps.wm,
            locator: deps.locator,
            launcher: deps.launcher,
            screen: deps.screen,
            focus,
            config,
            ids,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn focus_stack(&self) -> &FocusStack<S, C> {
        &self.focus
    }

    /// Pop the most recent focus entry without restoring it
    pub fn focus_stack_pop(&self) -> Result<Option<FocusStackEntry>, ActivationError> {
        self.focus.peek_and_pop()
    }

    pub(crate) fn resolve(&self, project_id: &str) -> Result<Project, ActivationError> {
        self.config
            .project(project_id)
            .cloned()
            .ok_or_else(|| ActivationError::ProjectNotFound {
                project: project_id.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "../orchestrator_tests/mod.rs"]
mod tests;
