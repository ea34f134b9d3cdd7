// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display metrics and window positioning

mod macos;

pub use macos::{parse_screen_info, MacScreen};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeScreen, FrameCall};

use ap_core::{Rect, WindowRecord, WindowTag};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("`{command}` failed: {message}")]
    Command { command: String, message: String },
    #[error("unexpected output from `{command}`: {message}")]
    Parse { command: String, message: String },
}

/// Main display geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenInfo {
    /// Backing-store width in physical pixels
    pub pixel_width: u32,
    /// Area not covered by the menu bar or Dock, in points
    pub visible_frame: Rect,
}

#[async_trait]
pub trait ScreenMetrics: Clone + Send + Sync + 'static {
    async fn main_screen(&self) -> Result<ScreenInfo, ScreenError>;
}

#[async_trait]
pub trait WindowPositioner: Clone + Send + Sync + 'static {
    /// Move and resize the window of `window.app_bundle_id` whose title carries `tag`
    async fn set_frame(
        &self,
        window: &WindowRecord,
        tag: &WindowTag,
        frame: Rect,
    ) -> Result<(), ScreenError>;
}
