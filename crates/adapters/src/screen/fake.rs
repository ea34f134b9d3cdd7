// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake display for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ScreenError, ScreenInfo, ScreenMetrics, WindowPositioner};
use ap_core::{Rect, WindowRecord, WindowTag};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Recorded positioning call
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCall {
    pub window_id: u64,
    pub tag: String,
    pub frame: Rect,
}

struct FakeScreenState {
    info: Result<ScreenInfo, ScreenError>,
    failing_windows: HashSet<u64>,
    frames: Vec<FrameCall>,
}

/// Fake display; clones share state. Defaults to a 5K-class wide display.
#[derive(Clone)]
pub struct FakeScreen {
    inner: Arc<Mutex<FakeScreenState>>,
}

impl Default for FakeScreen {
    fn default() -> Self {
        Self::with_info(ScreenInfo {
            pixel_width: 5120,
            visible_frame: Rect::new(0.0, 25.0, 2560.0, 1415.0),
        })
    }
}

impl FakeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(info: ScreenInfo) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeScreenState {
                info: Ok(info),
                failing_windows: HashSet::new(),
                frames: Vec::new(),
            })),
        }
    }

    /// A laptop-class display below the compact threshold
    pub fn compact() -> Self {
        Self::with_info(ScreenInfo {
            pixel_width: 3024,
            visible_frame: Rect::new(0.0, 38.0, 1512.0, 944.0),
        })
    }

    pub fn set_unavailable(&self, message: &str) {
        self.inner.lock().info = Err(ScreenError::Command {
            command: "osascript -l JavaScript".to_string(),
            message: message.to_string(),
        });
    }

    pub fn fail_window(&self, window_id: u64) {
        self.inner.lock().failing_windows.insert(window_id);
    }

    pub fn frames(&self) -> Vec<FrameCall> {
        self.inner.lock().frames.clone()
    }
}

#[async_trait]
impl ScreenMetrics for FakeScreen {
    async fn main_screen(&self) -> Result<ScreenInfo, ScreenError> {
        self.inner.lock().info.clone()
    }
}

#[async_trait]
impl WindowPositioner for FakeScreen {
    async fn set_frame(
        &self,
        window: &WindowRecord,
        tag: &WindowTag,
        frame: Rect,
    ) -> Result<(), ScreenError> {
        let mut inner = self.inner.lock();
        if inner.failing_windows.contains(&window.window_id) {
            return Err(ScreenError::Command {
                command: "osascript -e".to_string(),
                message: format!("window {} not found", window.window_id),
            });
        }
        inner.frames.push(FrameCall {
            window_id: window.window_id,
            tag: tag.to_string(),
            frame,
        });
        Ok(())
    }
}
