// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Focus history entries for returning to non-project context

use serde::{Deserialize, Serialize};
use std::fmt;

/// What was focused before control moved into a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusTarget {
    /// A specific window, restored by id if it still exists
    Window {
        window_id: u64,
        app_bundle_id: String,
        workspace: String,
    },
    /// An application with no identifiable window, restored by activating it
    App { bundle_id: String },
}

impl fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusTarget::Window {
                window_id,
                app_bundle_id,
                workspace,
            } => write!(f, "window {} ({}) on {}", window_id, app_bundle_id, workspace),
            FocusTarget::App { bundle_id } => write!(f, "app {}", bundle_id),
        }
    }
}

/// Immutable focus stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusStackEntry {
    #[serde(flatten)]
    pub target: FocusTarget,
    pub captured_at_ms: u64,
}

impl FocusStackEntry {
    pub fn new(target: FocusTarget, captured_at_ms: u64) -> Self {
        Self {
            target,
            captured_at_ms,
        }
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.captured_at_ms)
    }

    /// Whether this entry refers to the same window or app as `other`
    pub fn same_identity(&self, other: &FocusTarget) -> bool {
        match (&self.target, other) {
            (
                FocusTarget::Window { window_id: a, .. },
                FocusTarget::Window { window_id: b, .. },
            ) => a == b,
            (FocusTarget::App { bundle_id: a }, FocusTarget::App { bundle_id: b }) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "focus_tests.rs"]
mod tests;
