// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Window records as reported by the window manager

use crate::project::WindowTag;
use serde::{Deserialize, Serialize};

/// One window from a window manager listing.
///
/// Always sourced fresh from a query; external state can change between any
/// two orchestration steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub window_id: u64,
    pub app_bundle_id: String,
    pub workspace: String,
    pub title: String,
}

impl WindowRecord {
    /// Whether this window belongs to `bundle_id` and carries `tag`
    pub fn is_claimed_by(&self, bundle_id: &str, tag: &WindowTag) -> bool {
        self.app_bundle_id == bundle_id && tag.matches(&self.title)
    }
}
