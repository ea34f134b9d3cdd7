// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! macOS display metrics (JXA) and window positioning (System Events)

use super::{ScreenError, ScreenInfo, ScreenMetrics, WindowPositioner};
use crate::runner::{describe, CommandRunner, OSASCRIPT_TIMEOUT};
use ap_core::{Rect, WindowRecord, WindowTag};
use async_trait::async_trait;
use serde::Deserialize;

/// Reports the primary display in top-left coordinates
const SCREEN_SCRIPT: &str = r#"ObjC.import('AppKit');
var s = $.NSScreen.screens.objectAtIndex(0);
var f = s.frame, v = s.visibleFrame;
JSON.stringify({
  scale: s.backingScaleFactor,
  frame: { x: f.origin.x, y: f.origin.y, width: f.size.width, height: f.size.height },
  visible: { x: v.origin.x, y: v.origin.y, width: v.size.width, height: v.size.height }
});"#;

#[derive(Clone)]
pub struct MacScreen<R> {
    runner: R,
}

impl<R: CommandRunner> MacScreen<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn osascript(&self, args: Vec<String>) -> Result<String, ScreenError> {
        let command = describe("osascript", &args);
        let output = self
            .runner
            .run("osascript", &args, OSASCRIPT_TIMEOUT)
            .await
            .map_err(|e| ScreenError::Command {
                command: command.clone(),
                message: e.to_string(),
            })?;
        if !output.success() {
            return Err(ScreenError::Command {
                command,
                message: format!("exit code {}: {}", output.exit_code, output.stderr.trim()),
            });
        }
        Ok(output.stdout)
    }
}

#[derive(Deserialize)]
struct RawRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawScreen {
    scale: f64,
    frame: RawRect,
    visible: RawRect,
}

/// Convert the JXA report (Cocoa, bottom-left origin) to [`ScreenInfo`].
pub fn parse_screen_info(stdout: &str) -> Result<ScreenInfo, ScreenError> {
    let error = |message: String| ScreenError::Parse {
        command: "osascript -l JavaScript".to_string(),
        message,
    };
    let raw: RawScreen = serde_json::from_str(stdout.trim()).map_err(|e| error(e.to_string()))?;
    if raw.scale <= 0.0 || raw.frame.width <= 0.0 || raw.visible.width <= 0.0 {
        return Err(error(format!("degenerate display geometry: {}", stdout.trim())));
    }

    let top = raw.frame.y + raw.frame.height - (raw.visible.y + raw.visible.height);
    Ok(ScreenInfo {
        pixel_width: (raw.frame.width * raw.scale).round() as u32,
        visible_frame: Rect::new(
            raw.visible.x - raw.frame.x,
            top,
            raw.visible.width,
            raw.visible.height,
        ),
    })
}

fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// AppleScript moving the tagged window of an application
pub(crate) fn set_frame_script(bundle_id: &str, tag: &WindowTag, frame: Rect) -> String {
    format!(
        r#"tell application "System Events"
  set proc to first application process whose bundle identifier is "{bundle}"
  set win to first window of proc whose name contains "{tag}"
  set position of win to {{{x}, {y}}}
  set size of win to {{{w}, {h}}}
end tell"#,
        bundle = escape_applescript(bundle_id),
        tag = escape_applescript(tag.as_str()),
        x = frame.x.round() as i64,
        y = frame.y.round() as i64,
        w = frame.width.round() as i64,
        h = frame.height.round() as i64,
    )
}

#[async_trait]
impl<R: CommandRunner> ScreenMetrics for MacScreen<R> {
    async fn main_screen(&self) -> Result<ScreenInfo, ScreenError> {
        let stdout = self
            .osascript(vec![
                "-l".to_string(),
                "JavaScript".to_string(),
                "-e".to_string(),
                SCREEN_SCRIPT.to_string(),
            ])
            .await?;
        parse_screen_info(&stdout)
    }
}

#[async_trait]
impl<R: CommandRunner> WindowPositioner for MacScreen<R> {
    async fn set_frame(
        &self,
        window: &WindowRecord,
        tag: &WindowTag,
        frame: Rect,
    ) -> Result<(), ScreenError> {
        let script = set_frame_script(&window.app_bundle_id, tag, frame);
        self.osascript(vec!["-e".to_string(), script]).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "macos_tests.rs"]
mod tests;
