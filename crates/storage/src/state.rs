// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk state document

use ap_core::{CircuitSnapshot, FocusStackEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version written by this build. Files with a newer version are refused.
pub const CURRENT_STATE_VERSION: u32 = 1;

/// Everything persisted between invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    /// Set by the store on every save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Oldest entry first; the top of the stack is the last element
    #[serde(default)]
    pub focus_stack: Vec<FocusStackEntry>,
    /// Window manager breaker, shared by every invocation
    #[serde(default, skip_serializing_if = "CircuitSnapshot::is_clear")]
    pub circuit: CircuitSnapshot,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            version: CURRENT_STATE_VERSION,
            saved_at: None,
            focus_stack: Vec::new(),
            circuit: CircuitSnapshot::default(),
        }
    }
}
